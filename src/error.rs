//! Error types for Cnack Studio
//!
//! This module provides structured error definitions using thiserror,
//! with anyhow used for propagation at the application boundary.

use thiserror::Error;

/// Main error type for studio operations
#[derive(Error, Debug)]
pub enum StudioError {
    /// HTTP request to the analyzer service failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error (export files, preference store)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Submission rejected locally: nothing to analyze
    #[error("Please enter code to analyze.")]
    EmptyInput,

    /// The analyzer ran but reported a failure; the payload is the
    /// human-readable report (first line is the short summary)
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl StudioError {
    /// Short one-line summary suitable for a status bar
    pub fn summary(&self) -> String {
        match self {
            StudioError::Analysis(report) => report
                .lines()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("Analysis failed")
                .trim()
                .to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for studio operations
pub type Result<T> = std::result::Result<T, StudioError>;

/// Convert anyhow::Error to StudioError
impl From<anyhow::Error> for StudioError {
    fn from(err: anyhow::Error) -> Self {
        StudioError::Other(err.to_string())
    }
}
