//! Editor widget
//!
//! Renders the document as three stacked concerns: a line-number gutter,
//! colorized text, and the cursor cell. Gutter and text are drawn from
//! the same `EditorState` offsets, so their scroll positions cannot
//! diverge; adjusting the offsets once moves every region before the
//! next paint.

use super::{Document, Theme};
use crate::lang::{tokenize, Category};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};

/// Scroll state shared by the gutter and the text region
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorState {
    /// Vertical scroll offset in lines
    pub scroll: usize,

    /// Horizontal scroll offset in columns (text region only; the gutter
    /// never scrolls horizontally)
    pub h_scroll: usize,
}

impl EditorState {
    /// Adjust both offsets so the cursor cell is inside the viewport
    pub fn ensure_cursor_visible(
        &mut self,
        cursor: (usize, usize),
        viewport: (usize, usize),
    ) {
        let (line, col) = cursor;
        let (height, width) = viewport;

        if height > 0 {
            if line >= self.scroll + height {
                self.scroll = line - height + 1;
            }
            if line < self.scroll {
                self.scroll = line;
            }
        }
        if width > 0 {
            if col >= self.h_scroll + width {
                self.h_scroll = col - width + 1;
            }
            if col < self.h_scroll {
                self.h_scroll = col;
            }
        }
    }

    /// Scroll vertically by a signed number of lines, clamped at the top
    pub fn scroll_by(&mut self, delta: isize) {
        if delta < 0 {
            self.scroll = self.scroll.saturating_sub(delta.unsigned_abs());
        } else {
            self.scroll += delta as usize;
        }
    }
}

/// Widget rendering a [`Document`]
pub struct EditorWidget<'a> {
    document: &'a Document,
    theme: Theme,
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a> EditorWidget<'a> {
    pub fn new(document: &'a Document, theme: Theme) -> Self {
        Self {
            document,
            theme,
            block: None,
            focused: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Gutter digit width
    fn line_number_width(&self) -> usize {
        let count = self.document.line_count().max(1);
        (count.ilog10() as usize + 1).max(3)
    }
}

/// Colorized text, one [`Line`] per source line. Tokenizer spans are
/// split on newlines so each source line carries its own styled segments.
fn styled_lines(text: &str, theme: Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    for token in tokenize(text) {
        let style = theme.category_style(token.category);
        for (i, part) in token.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            if !part.is_empty() {
                let segment = Span::styled(part.to_string(), style);
                lines.last_mut().expect("at least one line").push(segment);
            }
        }
    }
    lines.into_iter().map(Line::from).collect()
}

impl<'a> StatefulWidget for EditorWidget<'a> {
    type State = EditorState;

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

        let gutter_width = self.line_number_width() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(gutter_width), Constraint::Min(1)])
            .split(inner);
        let gutter_area = chunks[0];
        let text_area = chunks[1];

        let (cursor_line, cursor_col) = self.document.line_col();
        state.ensure_cursor_visible(
            (cursor_line, cursor_col),
            (text_area.height as usize, text_area.width as usize),
        );

        // One source of truth for all regions
        let scroll = state.scroll;
        let h_scroll = state.h_scroll;

        self.render_gutter(gutter_area, buf, scroll, cursor_line);

        if self.document.text().is_empty() {
            let placeholder = Paragraph::new("// write code here")
                .style(self.theme.category_style(Category::Comment));
            placeholder.render(text_area, buf);
        } else {
            let text = Text::from(styled_lines(self.document.text(), self.theme));
            Paragraph::new(text)
                .scroll((scroll as u16, h_scroll as u16))
                .render(text_area, buf);
        }

        if self.focused {
            self.render_cursor(text_area, buf, scroll, h_scroll, cursor_line, cursor_col);
        }
    }
}

impl<'a> EditorWidget<'a> {
    fn render_gutter(&self, area: Rect, buf: &mut Buffer, scroll: usize, cursor_line: usize) {
        let line_count = self.document.line_count();
        let digits = area.width.saturating_sub(2) as usize;

        for row in 0..area.height as usize {
            let line = scroll + row;
            if line >= line_count {
                break;
            }
            let style = self.theme.gutter_style(self.focused && line == cursor_line);
            let label = format!("{:>digits$} ", line + 1);
            buf.set_string(area.x, area.y + row as u16, &label, style);
        }
    }

    /// Invert the cell under the cursor
    fn render_cursor(
        &self,
        area: Rect,
        buf: &mut Buffer,
        scroll: usize,
        h_scroll: usize,
        line: usize,
        col: usize,
    ) {
        if line < scroll || col < h_scroll {
            return;
        }
        let y = line - scroll;
        let x = col - h_scroll;
        if y >= area.height as usize || x >= area.width as usize {
            return;
        }
        let pos = (area.x + x as u16, area.y + y as u16);
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_follows_cursor_down_and_up() {
        let mut state = EditorState::default();
        state.ensure_cursor_visible((50, 0), (20, 80));
        assert_eq!(state.scroll, 31);
        assert!(50 >= state.scroll && 50 < state.scroll + 20);

        state.ensure_cursor_visible((10, 0), (20, 80));
        assert_eq!(state.scroll, 10);
    }

    #[test]
    fn test_horizontal_scroll_follows_cursor() {
        let mut state = EditorState::default();
        state.ensure_cursor_visible((0, 120), (20, 80));
        assert_eq!(state.h_scroll, 41);

        state.ensure_cursor_visible((0, 5), (20, 80));
        assert_eq!(state.h_scroll, 5);
    }

    #[test]
    fn test_scroll_by_clamps_at_top() {
        let mut state = EditorState::default();
        state.scroll_by(-3);
        assert_eq!(state.scroll, 0);
        state.scroll_by(5);
        state.scroll_by(-2);
        assert_eq!(state.scroll, 3);
    }

    #[test]
    fn test_styled_lines_split_on_newlines() {
        let lines = styled_lines("int x;\n// note\n", Theme::Dark);
        assert_eq!(lines.len(), 3); // trailing newline opens an empty line
        assert!(lines[2].spans.is_empty());
    }

    #[test]
    fn test_styled_lines_reassemble_source() {
        let src = "execute() {\n    display(\"hi\");\n}";
        let lines = styled_lines(src, Theme::Dark);
        let rebuilt: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(rebuilt.join("\n"), src);
    }

    #[test]
    fn test_gutter_width_grows_with_line_count() {
        let doc = Document::with_text("a\n".repeat(5));
        let widget = EditorWidget::new(&doc, Theme::Dark);
        assert_eq!(widget.line_number_width(), 3);

        let doc = Document::with_text("a\n".repeat(5000));
        let widget = EditorWidget::new(&doc, Theme::Dark);
        assert_eq!(widget.line_number_width(), 4);
    }
}
