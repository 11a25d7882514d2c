//! Report export
//!
//! Serializes the raw report text to a flat file artifact, appending the
//! engine's completion banner when the report lacks one (truncated
//! transfers, syntax-mode diagnostics).

use crate::error::Result;
use crate::services::AnalysisMode;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::info;

/// Completion marker the engine prints at the end of a full report
pub const END_MARKER: &str = "END OF ANALYSIS";

const END_BANNER: &str = "\n================================================\n     END OF ANALYSIS\n================================================\n";

/// Raw report text, with the completion banner appended when missing
pub fn with_end_marker(raw: &str) -> Cow<'_, str> {
    if raw.contains(END_MARKER) {
        Cow::Borrowed(raw)
    } else {
        let mut content = String::with_capacity(raw.len() + END_BANNER.len());
        content.push_str(raw);
        content.push_str(END_BANNER);
        Cow::Owned(content)
    }
}

/// Artifact file name for a mode (matches the names the engine itself uses)
pub fn artifact_name(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Lexical => "lexical_analysis_output.txt",
        AnalysisMode::Syntax => "syntax_analysis_output.txt",
    }
}

/// Write the report artifact into `dir`, returning the path written
pub fn write_artifact(dir: &Path, mode: AnalysisMode, raw: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(artifact_name(mode));
    fs::write(&path, with_end_marker(raw).as_bytes())?;
    info!(path = %path.display(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_marker_appended_when_missing() {
        let content = with_end_marker("partial report\n");
        assert!(content.contains("END OF ANALYSIS"));
        assert!(content.starts_with("partial report\n"));
    }

    #[test]
    fn test_marker_not_duplicated() {
        let raw = "report\n     END OF ANALYSIS\n";
        let content = with_end_marker(raw);
        assert_eq!(content.matches(END_MARKER).count(), 1);
        assert_eq!(content, raw);
    }

    #[test]
    fn test_artifact_names_per_mode() {
        assert_eq!(
            artifact_name(AnalysisMode::Lexical),
            "lexical_analysis_output.txt"
        );
        assert_eq!(
            artifact_name(AnalysisMode::Syntax),
            "syntax_analysis_output.txt"
        );
    }

    #[test]
    fn test_write_artifact_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(dir.path(), AnalysisMode::Lexical, "rows\n").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("rows\n"));
        assert!(written.contains(END_MARKER));
        assert!(path.ends_with("lexical_analysis_output.txt"));
    }
}
