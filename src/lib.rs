//! Cnack Studio - Interactive editor for the Cnack language
//!
//! A terminal workbench for writing Cnack source and inspecting what the
//! external analysis engine makes of it:
//! - Editing surface with syntax-aware coloring and auto-indent
//! - Lossless display tokenizer for the Cnack language
//! - Client for the engine's `/lexical` and `/syntax` endpoints
//! - Tabular report view with line filtering and file export
//!
//! # Architecture
//!
//! The crate is organized into a few layers:
//! - **lang**: Display tokenizer (spans, categories, keyword table)
//! - **report**: Parsing, filtering and export of engine reports
//! - **services**: HTTP client for the analysis engine
//! - **studio**: The application itself (document, widgets, event loop)
//! - **tui**: Terminal lifecycle and event polling

pub mod config;
pub mod error;
pub mod lang;
pub mod report;
pub mod services;
pub mod studio;
pub mod tui;

// Re-export commonly used types
pub use config::{Preferences, StudioConfig};
pub use error::{Result, StudioError};
pub use lang::{tokenize, Category, Span};
pub use report::{filter_rows, parse_report, ReportRow};
pub use services::{AnalysisMode, AnalyzerClient, AnalyzerConfig};
pub use studio::{Document, StudioApp, Theme};
