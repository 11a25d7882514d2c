//! The studio application
//!
//! Editor surface, report panel, theming, and the orchestrating app that
//! ties document editing to the external analysis service.

mod app;
mod document;
mod editor_widget;
mod report_panel;
mod theme;

pub use app::StudioApp;
pub use document::Document;
pub use editor_widget::{EditorState, EditorWidget};
pub use report_panel::{ReportContent, ReportPanel, ReportPanelState};
pub use theme::Theme;
