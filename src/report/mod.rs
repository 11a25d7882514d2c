//! Analysis report handling
//!
//! Structures the semi-structured tabular text produced by the external
//! analysis engine, filters it for display, and exports it to disk.

mod export;
mod parser;

pub use export::{artifact_name, with_end_marker, write_artifact, END_MARKER};
pub use parser::{filter_rows, parse_report, ReportRow, DIVIDER_MARKER};
