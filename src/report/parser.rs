//! Tabular report parser
//!
//! The engine prints a banner, a column header, a divider line, then one
//! row per recognized token:
//!
//! ```text
//! LINE   | TOKEN TYPE           | LEXEME
//! -------|----------------------|----------------------------------
//! 2      | TOKEN_RW_EXECUTE     | execute
//! ```
//!
//! Everything before and including the divider is preamble. The divider
//! marker and the `|` column delimiter are a compatibility contract with
//! the engine and must not be changed.

/// Substring identifying the divider line
pub const DIVIDER_MARKER: &str = "-------|";

/// One structured record decoded from a report data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Source line number, kept as text exactly as reported
    pub line: String,
    /// Token type name, e.g. `TOKEN_IDENTIFIER`
    pub token_type: String,
    /// Lexeme text; pipes after the second delimiter are kept verbatim
    pub lexeme: String,
}

/// Parse report text into ordered rows
///
/// Lines before the divider are ignored. After it, a non-blank line
/// yields a row when it contains at least two pipes: `line` before the
/// first, `token_type` between the two, `lexeme` everything after the
/// second (all trimmed). Malformed lines are skipped; a missing divider
/// yields no rows. Never fails.
pub fn parse_report(text: &str) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    let mut in_data = false;

    for line in text.lines() {
        if !in_data {
            if line.contains(DIVIDER_MARKER) {
                in_data = true;
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some(first) = line.find('|') else { continue };
        let Some(second) = line[first + 1..].find('|').map(|i| first + 1 + i) else {
            continue;
        };

        rows.push(ReportRow {
            line: line[..first].trim().to_string(),
            token_type: line[first + 1..second].trim().to_string(),
            lexeme: line[second + 1..].trim().to_string(),
        });
    }

    rows
}

/// Rows to display for a given line filter
///
/// An empty or whitespace-only filter selects every row; otherwise only
/// rows whose `line` exactly equals the trimmed filter value.
pub fn filter_rows<'a>(rows: &'a [ReportRow], line_filter: &str) -> Vec<&'a ReportRow> {
    let wanted = line_filter.trim();
    if wanted.is_empty() {
        rows.iter().collect()
    } else {
        rows.iter().filter(|row| row.line == wanted).collect()
    }
}
