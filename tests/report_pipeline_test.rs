//! End-to-end report pipeline: engine-shaped text through parsing,
//! filtering and export, using only the public crate API.

use cnack_studio::report::{filter_rows, parse_report, with_end_marker, write_artifact};
use cnack_studio::AnalysisMode;
use tempfile::TempDir;

/// A report shaped like real engine output: preamble, header, divider,
/// fixed-width rows
const ENGINE_REPORT: &str = "\
CNACK LEXICAL ANALYSIS
========================================

LINE   | TOKEN TYPE           | LEXEME
-------|----------------------|--------------------------------
1      | KEYWORD              | int
1      | IDENTIFIER           | x
1      | OPERATOR             | =
1      | INT_LITERAL          | 10
1      | SEMICOLON            | ;
2      | KEYWORD              | display
2      | STRING_LITERAL       | \"a | b\"
";

#[test]
fn test_parse_engine_report() {
    let rows = parse_report(ENGINE_REPORT);
    assert_eq!(rows.len(), 7);

    assert_eq!(rows[0].line, "1");
    assert_eq!(rows[0].token_type, "KEYWORD");
    assert_eq!(rows[0].lexeme, "int");

    // A pipe inside the lexeme survives the two-split row format
    assert_eq!(rows[6].lexeme, "\"a | b\"");
}

#[test]
fn test_filter_then_export() {
    let rows = parse_report(ENGINE_REPORT);

    let line_two = filter_rows(&rows, "2");
    assert_eq!(line_two.len(), 2);
    assert!(line_two.iter().all(|r| r.line == "2"));

    let everything = filter_rows(&rows, "  ");
    assert_eq!(everything.len(), rows.len());

    let dir = TempDir::new().unwrap();
    let path = write_artifact(dir.path(), AnalysisMode::Lexical, ENGINE_REPORT).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "lexical_analysis_output.txt"
    );

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("CNACK LEXICAL ANALYSIS"));
    assert!(written.contains("END OF ANALYSIS"));
}

#[test]
fn test_export_does_not_duplicate_end_marker() {
    let report = format!("{ENGINE_REPORT}\nEND OF ANALYSIS\n");
    let finished = with_end_marker(&report);
    assert_eq!(finished.matches("END OF ANALYSIS").count(), 1);

    let dir = TempDir::new().unwrap();
    let path = write_artifact(dir.path(), AnalysisMode::Syntax, &report).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.matches("END OF ANALYSIS").count(), 1);
}

#[test]
fn test_preamble_without_divider_yields_no_rows() {
    let rows = parse_report("CNACK LEXICAL ANALYSIS\nno table here\n1 | A | b\n");
    assert!(rows.is_empty());
}
