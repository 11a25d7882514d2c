//! External service integration
//!
//! The analysis engine is an opaque executable behind an HTTP service;
//! this module only implements the client side of that boundary.

mod analyzer;

pub use analyzer::{AnalysisMode, AnalyzerClient, AnalyzerConfig};
