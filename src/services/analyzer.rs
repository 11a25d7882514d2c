//! HTTP client for the Cnack analysis service
//!
//! Submits `{ "code": ... }` to the `/lexical` or `/syntax` endpoint and
//! returns the raw report text. Failures come back in two shapes: an
//! HTTP-level error with an `{ "error": ... }` body, or a 200 envelope
//! with `success: false` whose `output` still carries a human-readable
//! error report.

use crate::error::{Result, StudioError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Which analysis endpoint and report-rendering strategy is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AnalysisMode {
    /// Token table from the lexer
    #[default]
    Lexical,
    /// Free-form diagnostics from the parser
    Syntax,
}

impl AnalysisMode {
    /// Endpoint path on the analysis service
    pub fn endpoint_path(self) -> &'static str {
        match self {
            AnalysisMode::Lexical => "/lexical",
            AnalysisMode::Syntax => "/syntax",
        }
    }

    /// Toggle between the two modes
    pub fn toggled(self) -> Self {
        match self {
            AnalysisMode::Lexical => AnalysisMode::Syntax,
            AnalysisMode::Syntax => AnalysisMode::Lexical,
        }
    }

    /// Human-readable label for panel titles
    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::Lexical => "Lexical Analysis",
            AnalysisMode::Syntax => "Syntax Analysis",
        }
    }
}

/// Configuration for the analyzer client
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Base URL of the analysis service
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Request body for both endpoints
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    code: &'a str,
}

/// Success-shaped response envelope
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    success: bool,
    #[serde(default)]
    output: String,
}

/// HTTP-level error body
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for the analysis service
#[derive(Clone)]
pub struct AnalyzerClient {
    config: AnalyzerConfig,
    client: reqwest::Client,
}

impl AnalyzerClient {
    /// Create a new client
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Submit source text for analysis and return the raw report text
    ///
    /// Empty or whitespace-only documents are rejected locally before any
    /// request is made; the service independently rejects them with a
    /// 400-class error.
    pub async fn analyze(&self, mode: AnalysisMode, code: &str) -> Result<String> {
        if code.trim().is_empty() {
            return Err(StudioError::EmptyInput);
        }

        let url = format!("{}{}", self.config.base_url, mode.endpoint_path());
        debug!(%url, bytes = code.len(), "submitting analysis request");

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { code })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Analysis failed".to_string());
            warn!(%status, "analysis service returned an error");
            return Err(StudioError::Analysis(message));
        }

        let envelope: AnalyzeResponse = response.json().await?;
        if !envelope.success {
            warn!("analysis engine reported failure");
            return Err(StudioError::Analysis(envelope.output));
        }

        debug!(bytes = envelope.output.len(), "analysis report received");
        Ok(envelope.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(AnalysisMode::Lexical.endpoint_path(), "/lexical");
        assert_eq!(AnalysisMode::Syntax.endpoint_path(), "/syntax");
    }

    #[test]
    fn test_mode_toggle_roundtrip() {
        assert_eq!(AnalysisMode::Lexical.toggled(), AnalysisMode::Syntax);
        assert_eq!(AnalysisMode::Lexical.toggled().toggled(), AnalysisMode::Lexical);
    }

    #[test]
    fn test_empty_input_rejected_locally() {
        let client = AnalyzerClient::new(AnalyzerConfig::default()).unwrap();
        let err = tokio_test::block_on(client.analyze(AnalysisMode::Lexical, "   \n  "))
            .expect_err("whitespace-only input must not be submitted");
        assert!(matches!(err, StudioError::EmptyInput));
    }

    #[test]
    fn test_envelope_deserialization() {
        let ok: AnalyzeResponse =
            serde_json::from_str(r#"{"success":true,"output":"rows","type":"success"}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.output, "rows");

        let failed: AnalyzeResponse =
            serde_json::from_str(r#"{"success":false,"output":"[Syntax Error] Line 1"}"#).unwrap();
        assert!(!failed.success);

        let http_err: ErrorResponse =
            serde_json::from_str(r#"{"error":"Empty code: Please enter some code to analyze."}"#)
                .unwrap();
        assert!(http_err.error.starts_with("Empty code"));
    }

    #[test]
    fn test_request_serialization() {
        let body = serde_json::to_string(&AnalyzeRequest { code: "exit();" }).unwrap();
        assert_eq!(body, r#"{"code":"exit();"}"#);
    }
}
