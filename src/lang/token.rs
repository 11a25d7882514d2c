//! Token categories and the Cnack reserved-word set

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Display category for a classified span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Line or block comment
    Comment,
    /// Double-quoted string literal (or a fragment of one around a
    /// placeholder decomposition)
    Str,
    /// Reserved word
    Keyword,
    /// Numeric literal
    Number,
    /// Single-character punctuation: `()[]{};,:`
    Punctuation,
    /// Operator, single- or multi-character
    Operator,
    /// Identifier, whitespace, or anything else
    Plain,
}

/// One classified span of source text
///
/// Spans form a lossless partition: concatenating the `text` of every
/// span in order reproduces the scanner input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub category: Category,
}

impl Span {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Keywords and reserved words of the Cnack language
pub const KEYWORDS: [&str; 30] = [
    "int", "float", "char", "bool", "string", "const", "if", "else", "elif", "switch", "case",
    "default", "assign", "struct", "for", "while", "do", "break", "continue", "ask", "display",
    "execute", "exit", "true", "false", "fetch", "fn", "when", "otherwise", "auto_ref",
];

static KEYWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| KEYWORDS.iter().copied().collect());

/// Whether an identifier run is a Cnack reserved word (exact match)
pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word)
}
