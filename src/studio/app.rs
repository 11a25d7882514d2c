//! Main studio application
//!
//! Wires the editor surface to the analysis service: edit, submit, show
//! loading / result / error, filter and export the report. A single busy
//! flag serializes submissions; the editor and the submit action are
//! disabled while a request is outstanding.

use super::{
    Document, EditorState, EditorWidget, ReportContent, ReportPanel, ReportPanelState, Theme,
};
use crate::config::{Preferences, StudioConfig};
use crate::error::StudioError;
use crate::report::{parse_report, write_artifact, ReportRow};
use crate::services::{AnalysisMode, AnalyzerClient, AnalyzerConfig};
use crate::tui::{EventLoop, TerminalConfig, TerminalManager, TuiEvent};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Document shown on first launch
const DEFAULT_PROGRAM: &str = "// Cnack Mini Compiler\n execute() {\n    int x = 10;\n    exit();\n}";

/// Application lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Quitting,
}

/// Which region receives plain keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Filter,
}

/// Main studio application
pub struct StudioApp {
    /// Analyzer service client
    client: AnalyzerClient,
    /// The edited document
    document: Document,
    /// Editor scroll state
    editor_state: EditorState,
    /// Report panel state (line filter, table selection, text scroll)
    report_state: ReportPanelState,
    /// Preference store backing the theme flag
    prefs: Preferences,
    /// Active color scheme
    theme: Theme,
    /// Active analysis mode
    mode: AnalysisMode,
    /// Keystroke routing
    focus: Focus,
    /// Lifecycle state
    state: AppState,
    /// True while a submission is in flight
    busy: bool,
    /// Verbatim report text from the last successful analysis
    raw_output: String,
    /// Structured rows parsed from `raw_output`
    rows: Vec<ReportRow>,
    /// Error report to display instead of the result, if any
    error: Option<String>,
    /// Status bar message
    status: String,
    /// Where exported artifacts are written
    export_dir: PathBuf,
    results_tx: mpsc::UnboundedSender<crate::error::Result<String>>,
    results_rx: mpsc::UnboundedReceiver<crate::error::Result<String>>,
}

impl StudioApp {
    /// Create the application from loaded configuration
    pub fn new(config: StudioConfig, mode: AnalysisMode) -> crate::error::Result<Self> {
        let client = AnalyzerClient::new(AnalyzerConfig {
            base_url: config.endpoint.clone(),
            timeout_secs: config.timeout_secs,
        })?;
        let prefs = Preferences::load();
        let theme = Theme::load(&prefs);
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            document: Document::with_text(DEFAULT_PROGRAM),
            editor_state: EditorState::default(),
            report_state: ReportPanelState::new(),
            prefs,
            theme,
            mode,
            focus: Focus::Editor,
            state: AppState::Running,
            busy: false,
            raw_output: String::new(),
            rows: Vec::new(),
            error: None,
            status: format!("Cnack Studio | {} mode", mode.label()),
            export_dir: PathBuf::from("."),
            results_tx,
            results_rx,
        })
    }

    /// Replace the document with the contents of a file
    pub fn load_file(&mut self, path: &Path) -> crate::error::Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.document.set_text(text);
        self.status = format!("Loaded: {}", path.display());
        info!(path = %path.display(), "file loaded");
        Ok(())
    }

    /// Run the application until quit
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalManager::new(TerminalConfig::default())?;
        let events = EventLoop::default();
        info!(endpoint = self.client.base_url(), "studio started");

        while self.state == AppState::Running {
            self.drain_results();
            self.render(&mut terminal)?;

            match events.poll_event()? {
                TuiEvent::Quit => self.state = AppState::Quitting,
                TuiEvent::Key(key) => self.handle_key(key),
                TuiEvent::Mouse(mouse) => self.handle_mouse(mouse),
                TuiEvent::Resize(_, _) | TuiEvent::Tick => {}
            }
        }

        Ok(())
    }

    /// Pull any finished analysis off the channel
    fn drain_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.finish_analysis(result);
        }
    }

    /// Apply the outcome of a submission
    fn finish_analysis(&mut self, result: crate::error::Result<String>) {
        self.busy = false;
        match result {
            Ok(output) => {
                self.rows = parse_report(&output);
                self.raw_output = output;
                self.error = None;
                self.status = match self.mode {
                    AnalysisMode::Lexical => {
                        format!("Lexical analysis complete: {} tokens", self.rows.len())
                    }
                    AnalysisMode::Syntax => "Syntax analysis complete".to_string(),
                };
                info!(rows = self.rows.len(), "analysis finished");
            }
            Err(err) => {
                // Failed submissions leave the previous report untouched
                self.status = err.summary();
                self.error = Some(match err {
                    StudioError::Analysis(report) => report,
                    other => other.to_string(),
                });
                warn!(status = %self.status, "analysis failed");
            }
        }
    }

    /// Submit the current document; gated by the busy flag
    fn submit(&mut self) {
        if self.busy {
            self.status = "Analysis already running".to_string();
            return;
        }
        if self.document.is_blank() {
            // Rejected locally; no request is made
            self.error = Some(StudioError::EmptyInput.to_string());
            self.status = StudioError::EmptyInput.to_string();
            return;
        }

        self.busy = true;
        self.error = None;
        self.status = "Analyzing...".to_string();

        let client = self.client.clone();
        let mode = self.mode;
        let code = self.document.text().to_string();
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = client.analyze(mode, &code).await;
            // The app may have quit while the request was in flight
            let _ = tx.send(result);
        });
    }

    /// Export the raw report (with completion banner) next to the cwd
    fn export(&mut self) {
        if self.raw_output.is_empty() {
            self.status = "Nothing to export yet".to_string();
            return;
        }
        match write_artifact(&self.export_dir, self.mode, &self.raw_output) {
            Ok(path) => self.status = format!("Saved: {}", path.display()),
            Err(err) => {
                warn!(error = %err, "export failed");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    /// Clear the document and every piece of report state
    fn clear(&mut self) {
        self.document.clear();
        self.raw_output.clear();
        self.rows.clear();
        self.error = None;
        self.report_state.clear_filter();
        self.status = "Cleared".to_string();
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.status = format!("{} mode", self.mode.label());
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.theme.persist(&mut self.prefs) {
            warn!(error = %err, "could not persist theme preference");
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Filter => self.handle_filter_key(key),
            Focus::Editor => self.handle_editor_key(key),
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Editor,
            KeyCode::Backspace => self.report_state.pop_filter_char(),
            KeyCode::Down => match self.mode {
                AnalysisMode::Lexical => {
                    let shown =
                        crate::report::filter_rows(&self.rows, self.report_state.line_filter())
                            .len();
                    self.report_state.select_next(shown);
                }
                AnalysisMode::Syntax => self.report_state.scroll_text_by(1),
            },
            KeyCode::Up => match self.mode {
                AnalysisMode::Lexical => self.report_state.select_previous(),
                AnalysisMode::Syntax => self.report_state.scroll_text_by(-1),
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.report_state.push_filter_char(c);
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => self.submit(),
                KeyCode::Char('l') => self.toggle_mode(),
                KeyCode::Char('t') => self.toggle_theme(),
                KeyCode::Char('d') => self.export(),
                KeyCode::Char('k') => {
                    if !self.busy {
                        self.clear();
                    }
                }
                KeyCode::Char('f') => {
                    if self.mode == AnalysisMode::Lexical {
                        self.focus = Focus::Filter;
                        self.status = "Line filter: type a line number, Enter/Esc to leave"
                            .to_string();
                    }
                }
                _ => {}
            }
            return;
        }

        // The editor is disabled while a request is outstanding
        if self.busy && Self::is_edit_key(key.code) {
            self.status = "Editor locked while analyzing".to_string();
            return;
        }

        match key.code {
            KeyCode::Char(c) => self.document.insert_char(c),
            KeyCode::Enter => self.document.insert_newline(),
            KeyCode::Tab => self.document.insert_tab(),
            KeyCode::Backspace => self.document.backspace(),
            KeyCode::Delete => self.document.delete_forward(),
            KeyCode::Left => self.document.move_left(),
            KeyCode::Right => self.document.move_right(),
            KeyCode::Up => self.document.move_up(),
            KeyCode::Down => self.document.move_down(),
            KeyCode::Home => self.document.move_line_start(),
            KeyCode::End => self.document.move_line_end(),
            KeyCode::PageUp => {
                for _ in 0..10 {
                    self.document.move_up();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..10 {
                    self.document.move_down();
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                for _ in 0..3 {
                    self.document.move_up();
                }
            }
            MouseEventKind::ScrollDown => {
                for _ in 0..3 {
                    self.document.move_down();
                }
            }
            _ => {}
        }
    }

    fn is_edit_key(code: KeyCode) -> bool {
        matches!(
            code,
            KeyCode::Char(_)
                | KeyCode::Enter
                | KeyCode::Tab
                | KeyCode::Backspace
                | KeyCode::Delete
        )
    }

    fn render(&mut self, terminal: &mut TerminalManager) -> Result<()> {
        let StudioApp {
            document,
            editor_state,
            report_state,
            theme,
            mode,
            focus,
            busy,
            raw_output,
            rows,
            error,
            status,
            ..
        } = self;
        let theme = *theme;
        let mode = *mode;

        let content = if *busy {
            ReportContent::Loading
        } else if let Some(message) = error.as_deref() {
            ReportContent::Error(message)
        } else if raw_output.is_empty() {
            ReportContent::Empty
        } else {
            match mode {
                AnalysisMode::Lexical => ReportContent::Table(rows),
                AnalysisMode::Syntax => ReportContent::Text(raw_output),
            }
        };

        let (cursor_line, cursor_col) = document.line_col();

        terminal.terminal_mut().draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(5),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            let status_bar =
                Paragraph::new(format!(" {status}")).style(theme.status_style());
            frame.render_widget(status_bar, chunks[0]);

            let panels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let editor_title = if *busy {
                " CODE INPUT (locked) ".to_string()
            } else {
                " CODE INPUT ".to_string()
            };
            let editor_block = Block::default().borders(Borders::ALL).title(editor_title);
            let editor = EditorWidget::new(document, theme)
                .block(editor_block)
                .focused(*focus == Focus::Editor);
            frame.render_stateful_widget(editor, panels[0], editor_state);

            let mut report_title = format!(" {} ", mode.label().to_uppercase());
            if mode == AnalysisMode::Lexical
                && (*focus == Focus::Filter || !report_state.line_filter().is_empty())
            {
                report_title = format!(
                    " {} | LINE FILTER: {}{} ",
                    mode.label().to_uppercase(),
                    report_state.line_filter(),
                    if *focus == Focus::Filter { "_" } else { "" },
                );
            }
            let report_block = Block::default()
                .borders(Borders::ALL)
                .title(report_title)
                .title_style(Style::default().add_modifier(Modifier::BOLD));
            let report = ReportPanel::new(content, theme).block(report_block);
            frame.render_stateful_widget(report, panels[1], report_state);

            let info = format!(
                " Ln {}, Col {} | {} | Ctrl+R analyze  Ctrl+L mode  Ctrl+F filter  Ctrl+D export  Ctrl+K clear  Ctrl+T theme  Ctrl+Q quit",
                cursor_line + 1,
                cursor_col + 1,
                mode.label(),
            );
            let info_bar = Paragraph::new(info).style(theme.gutter_style(false));
            frame.render_widget(info_bar, chunks[2]);
        })?;

        Ok(())
    }
}
