//! Hand-written scanner for display colorization
//!
//! Classification is an explicit ordered rule set evaluated at each scan
//! position, so precedence and tie-breaks stay auditable:
//!
//! 1. line comment `//` (to end of line)
//! 2. block comment `/*` ... `*/` (to nearest closer)
//! 3. double-quoted string with backslash escapes
//! 4. multi-character operators
//! 5. single-character punctuation
//! 6. single-character operators
//! 7. whitespace runs
//! 8. everything else: a plain run, reclassified as keyword or number
//!
//! Unterminated comments and strings never fail; the open construct runs
//! to end of input. Inside a string literal, a balanced `{...}` region is
//! decomposed one level deep for embedded-expression display.

use super::token::{is_keyword, Category, Span};

/// Multi-character operators, tried before any single-character rule
const MULTI_OPS: [&str; 8] = ["<<", ">>", "==", "!=", "<=", ">=", "&&", "||"];

/// Single-character punctuation
const PUNCTUATION: &str = "()[]{};,:";

/// Single-character operators
const OPERATORS: &str = "-+*/%<>&!|=";

/// Split source text into an ordered, lossless sequence of classified spans
pub fn tokenize(text: &str) -> Vec<Span> {
    let mut scanner = Scanner {
        src: text,
        pos: 0,
        spans: Vec::new(),
    };
    scanner.run();
    scanner.spans
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    spans: Vec<Span>,
}

impl<'a> Scanner<'a> {
    fn run(&mut self) {
        while self.pos < self.src.len() {
            let rest = &self.src[self.pos..];

            if rest.starts_with("//") {
                self.line_comment();
            } else if rest.starts_with("/*") {
                self.block_comment();
            } else if rest.starts_with('"') {
                self.string_literal();
            } else if let Some(op) = MULTI_OPS.iter().find(|op| rest.starts_with(**op)) {
                self.emit(op.len(), Category::Operator);
            } else {
                let c = rest.chars().next().expect("non-empty rest");
                if PUNCTUATION.contains(c) {
                    self.emit(c.len_utf8(), Category::Punctuation);
                } else if OPERATORS.contains(c) {
                    self.emit(c.len_utf8(), Category::Operator);
                } else if c.is_whitespace() {
                    let len = run_len(rest, |c| c.is_whitespace());
                    self.emit(len, Category::Plain);
                } else {
                    self.plain_run(rest);
                }
            }
        }
    }

    /// Push the next `len` bytes as one span
    fn emit(&mut self, len: usize, category: Category) {
        let text = &self.src[self.pos..self.pos + len];
        self.spans.push(Span::new(text, category));
        self.pos += len;
    }

    /// `//` to end of line (the newline stays with the following
    /// whitespace run)
    fn line_comment(&mut self) {
        let rest = &self.src[self.pos..];
        let len = rest.find('\n').unwrap_or(rest.len());
        self.emit(len, Category::Comment);
    }

    /// `/*` greedy to the nearest `*/`; unterminated runs to end of input
    fn block_comment(&mut self) {
        let rest = &self.src[self.pos..];
        let len = match rest[2..].find("*/") {
            Some(idx) => 2 + idx + 2,
            None => rest.len(),
        };
        self.emit(len, Category::Comment);
    }

    /// Double-quoted string; backslash-escaped characters (including `\"`)
    /// do not terminate it. Unterminated strings run to end of input.
    fn string_literal(&mut self) {
        let rest = &self.src[self.pos..];
        let mut chars = rest.char_indices().skip(1);
        let mut len = rest.len();
        while let Some((idx, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => {
                    len = idx + 1;
                    break;
                }
                _ => {}
            }
        }
        let literal = &self.src[self.pos..self.pos + len];
        self.push_string_spans(literal);
        self.pos += len;
    }

    /// Emit a string literal, decomposing each balanced `{...}` region into
    /// an opening brace, a symbol-classified interior, and a closing brace.
    /// Braces here are display-only and never code-level punctuation.
    fn push_string_spans(&mut self, literal: &str) {
        let mut tail_start = 0;
        let mut search_from = 0;
        while let Some(found) = literal[search_from..].find('{') {
            let open = search_from + found;
            let close = match matching_brace(&literal[open..]) {
                Some(offset) => open + offset,
                // Unbalanced region: the remainder stays part of the string
                None => break,
            };
            if open > tail_start {
                self.spans
                    .push(Span::new(&literal[tail_start..open], Category::Str));
            }
            self.spans.push(Span::new("{", Category::Punctuation));
            self.push_symbol_run(&literal[open + 1..close]);
            self.spans.push(Span::new("}", Category::Punctuation));
            tail_start = close + 1;
            search_from = tail_start;
        }
        if tail_start < literal.len() {
            self.spans
                .push(Span::new(&literal[tail_start..], Category::Str));
        }
    }

    /// Classify placeholder interiors with the operator/punctuation rules
    /// only; anything else is a plain run
    fn push_symbol_run(&mut self, inner: &str) {
        let mut pos = 0;
        while pos < inner.len() {
            let rest = &inner[pos..];
            if let Some(op) = MULTI_OPS.iter().find(|op| rest.starts_with(**op)) {
                self.spans.push(Span::new(*op, Category::Operator));
                pos += op.len();
                continue;
            }
            let c = rest.chars().next().expect("non-empty rest");
            if PUNCTUATION.contains(c) {
                self.spans
                    .push(Span::new(&rest[..c.len_utf8()], Category::Punctuation));
                pos += c.len_utf8();
            } else if OPERATORS.contains(c) {
                self.spans
                    .push(Span::new(&rest[..c.len_utf8()], Category::Operator));
                pos += c.len_utf8();
            } else {
                let len = run_len(rest, |c| {
                    !PUNCTUATION.contains(c) && !OPERATORS.contains(c)
                });
                self.spans.push(Span::new(&rest[..len], Category::Plain));
                pos += len;
            }
        }
    }

    /// Identifier-or-other run, reclassified as keyword or number when the
    /// whole run matches
    fn plain_run(&mut self, rest: &str) {
        let len = run_len(rest, |c| {
            !c.is_whitespace()
                && !PUNCTUATION.contains(c)
                && !OPERATORS.contains(c)
                && c != '"'
        });
        let run = &rest[..len];
        let category = if is_keyword(run) {
            Category::Keyword
        } else if is_number(run) {
            Category::Number
        } else {
            Category::Plain
        };
        self.emit(len, category);
    }
}

/// Byte length of the longest prefix whose chars satisfy `pred`
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Whole-run numeric test. The leading-character guard keeps alphabetic
/// runs that f64 happens to accept ("inf", "NaN") classified as plain.
fn is_number(run: &str) -> bool {
    run.chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit() || c == '.')
        && run.parse::<f64>().is_ok()
}

/// Byte offset of the `}` matching the `{` at the start of `s`, if balanced
fn matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in s.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_lossless_partition() {
        let src = "// Cnack Mini Compiler\n execute() {\n    int x = 10;\n    exit();\n}";
        let spans = tokenize(src);
        assert_eq!(joined(&spans), src);
    }

    #[test]
    fn test_keyword_precedence_over_identifier() {
        let spans = tokenize("int value");
        assert_eq!(spans[0], Span::new("int", Category::Keyword));
        assert_eq!(spans[2], Span::new("value", Category::Plain));
    }

    #[test]
    fn test_keyword_requires_exact_match() {
        let spans = tokenize("integer");
        assert_eq!(spans[0], Span::new("integer", Category::Plain));
    }

    #[test]
    fn test_number_reclassification() {
        let spans = tokenize("x = 10.5;");
        let number: Vec<_> = spans
            .iter()
            .filter(|s| s.category == Category::Number)
            .collect();
        assert_eq!(number.len(), 1);
        assert_eq!(number[0].text, "10.5");
    }

    #[test]
    fn test_alphabetic_float_parse_is_not_number() {
        // f64 would accept these; the display scanner must not
        for word in ["inf", "NaN", "infinity"] {
            let spans = tokenize(word);
            assert_eq!(spans[0].category, Category::Plain, "{word}");
        }
    }

    #[test]
    fn test_string_atomicity_with_escaped_quote() {
        let spans = tokenize(r#""a\"b""#);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0], Span::new(r#""a\"b""#, Category::Str));
    }

    #[test]
    fn test_unterminated_string_runs_to_eof() {
        let spans = tokenize("\"open ended");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Str);
        assert_eq!(spans[0].text, "\"open ended");
    }

    #[test]
    fn test_comment_takes_precedence_over_string() {
        let spans = tokenize("// not a \"string\"");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Comment);
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        let spans = tokenize("// note\nint");
        assert_eq!(spans[0], Span::new("// note", Category::Comment));
        assert_eq!(spans[1], Span::new("\n", Category::Plain));
        assert_eq!(spans[2], Span::new("int", Category::Keyword));
    }

    #[test]
    fn test_block_comment_greedy_to_nearest_closer() {
        let spans = tokenize("/* a */ x /* b */");
        assert_eq!(spans[0], Span::new("/* a */", Category::Comment));
        assert_eq!(spans[4], Span::new("/* b */", Category::Comment));
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_eof() {
        let spans = tokenize("/* never closed\nint x;");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Comment);
    }

    #[test]
    fn test_multichar_operator_beats_single() {
        let spans = tokenize("a<=b");
        assert_eq!(spans[1], Span::new("<=", Category::Operator));
        let spans = tokenize("a<b");
        assert_eq!(spans[1], Span::new("<", Category::Operator));
    }

    #[test]
    fn test_punctuation_and_operators() {
        let spans = tokenize("f(x);");
        let cats: Vec<_> = spans.iter().map(|s| s.category).collect();
        assert_eq!(
            cats,
            vec![
                Category::Plain,
                Category::Punctuation,
                Category::Plain,
                Category::Punctuation,
                Category::Punctuation,
            ]
        );
    }

    #[test]
    fn test_string_placeholder_decomposition() {
        let spans = tokenize(r#""total={a+b}!""#);
        assert_eq!(
            spans,
            vec![
                Span::new("\"total=", Category::Str),
                Span::new("{", Category::Punctuation),
                Span::new("a", Category::Plain),
                Span::new("+", Category::Operator),
                Span::new("b", Category::Plain),
                Span::new("}", Category::Punctuation),
                Span::new("!\"", Category::Str),
            ]
        );
        assert_eq!(joined(&spans), r#""total={a+b}!""#);
    }

    #[test]
    fn test_unbalanced_brace_stays_in_string() {
        let spans = tokenize(r#""oops {still text""#);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].category, Category::Str);
    }

    #[test]
    fn test_braces_outside_strings_are_punctuation() {
        let spans = tokenize("{ }");
        assert_eq!(spans[0], Span::new("{", Category::Punctuation));
        assert_eq!(spans[2], Span::new("}", Category::Punctuation));
    }

    proptest! {
        #[test]
        fn prop_tokenize_is_lossless(src in "\\PC{0,120}") {
            let spans = tokenize(&src);
            prop_assert_eq!(joined(&spans), src);
        }

        #[test]
        fn prop_tokenize_is_lossless_on_code_like_input(
            src in "[ \\t\\na-z0-9\"\\\\{}()\\[\\];,:<>=!&|+*/%-]{0,200}"
        ) {
            let spans = tokenize(&src);
            prop_assert_eq!(joined(&spans), src);
        }

        #[test]
        fn prop_no_empty_spans(src in "\\PC{0,120}") {
            for span in tokenize(&src) {
                prop_assert!(!span.text.is_empty());
            }
        }
    }
}
