//! Report panel
//!
//! Shows the outcome of the last submission: a filterable token table in
//! lexical mode, free-form diagnostic text in syntax mode, or the
//! loading / error / empty placeholders in between.

use super::Theme;
use crate::report::{filter_rows, ReportRow};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};

/// What the panel currently displays
#[derive(Debug, Clone, Copy)]
pub enum ReportContent<'a> {
    /// No analysis has run yet
    Empty,
    /// A submission is in flight
    Loading,
    /// The last submission failed; the first line is the short summary
    Error(&'a str),
    /// Lexical mode: structured token rows
    Table(&'a [ReportRow]),
    /// Syntax mode: verbatim engine text
    Text(&'a str),
}

/// Panel state: the active line filter plus scroll positions
#[derive(Debug, Clone, Default)]
pub struct ReportPanelState {
    /// Exact-match line filter; empty shows every row
    line_filter: String,

    /// Table selection/scroll state
    table: TableState,

    /// Vertical scroll for free-form text
    pub text_scroll: u16,
}

impl ReportPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filter text
    pub fn line_filter(&self) -> &str {
        &self.line_filter
    }

    /// Append a character to the filter
    pub fn push_filter_char(&mut self, c: char) {
        self.line_filter.push(c);
        self.table.select(None);
    }

    /// Delete the last filter character
    pub fn pop_filter_char(&mut self) {
        self.line_filter.pop();
        self.table.select(None);
    }

    /// Drop the filter entirely
    pub fn clear_filter(&mut self) {
        self.line_filter.clear();
        self.table.select(None);
    }

    /// Move the table selection down
    pub fn select_next(&mut self, shown: usize) {
        if shown == 0 {
            return;
        }
        let next = match self.table.selected() {
            Some(i) => (i + 1).min(shown - 1),
            None => 0,
        };
        self.table.select(Some(next));
    }

    /// Move the table selection up
    pub fn select_previous(&mut self) {
        let prev = self.table.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.table.select(Some(prev));
    }

    /// Scroll free-form text
    pub fn scroll_text_by(&mut self, delta: i16) {
        if delta < 0 {
            self.text_scroll = self.text_scroll.saturating_sub(delta.unsigned_abs());
        } else {
            self.text_scroll = self.text_scroll.saturating_add(delta as u16);
        }
    }
}

/// Report panel widget
pub struct ReportPanel<'a> {
    content: ReportContent<'a>,
    theme: Theme,
    block: Option<Block<'a>>,
}

impl<'a> ReportPanel<'a> {
    pub fn new(content: ReportContent<'a>, theme: Theme) -> Self {
        Self {
            content,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> StatefulWidget for ReportPanel<'a> {
    type State = ReportPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match self.content {
            ReportContent::Empty => {
                let hint = Paragraph::new(
                    "No analysis yet. Enter code and press Ctrl+R to get started.",
                )
                .style(Style::default().fg(ratatui::style::Color::DarkGray))
                .wrap(Wrap { trim: true });
                hint.render(inner, buf);
            }
            ReportContent::Loading => {
                Paragraph::new("Analyzing...")
                    .style(Style::default().fg(self.theme.accent()))
                    .render(inner, buf);
            }
            ReportContent::Error(message) => {
                self.render_error(message, inner, buf);
            }
            ReportContent::Text(raw) => {
                Paragraph::new(raw)
                    .scroll((state.text_scroll, 0))
                    .render(inner, buf);
            }
            ReportContent::Table(rows) => {
                self.render_table(rows, inner, buf, state);
            }
        }
    }
}

impl<'a> ReportPanel<'a> {
    fn render_error(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(Span::styled(
            "Error",
            self.theme.error_style().add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            message
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), self.theme.error_style()))),
        );
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn render_table(
        &self,
        rows: &[ReportRow],
        area: Rect,
        buf: &mut Buffer,
        state: &mut ReportPanelState,
    ) {
        let shown = filter_rows(rows, &state.line_filter);

        let header = Row::new(["LINE", "TOKEN TYPE", "LEXEME"].map(Cell::from)).style(
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        );

        let body = shown.iter().map(|row| {
            Row::new([
                Cell::from(row.line.clone()),
                Cell::from(row.token_type.clone()),
                Cell::from(row.lexeme.clone()),
            ])
        });

        let table = Table::new(
            body,
            [
                Constraint::Length(6),
                Constraint::Length(22),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

        StatefulWidget::render(table, area, buf, &mut state.table);
    }
}
