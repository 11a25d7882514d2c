//! Display-side lexical support for the Cnack language
//!
//! The scanner here exists purely to colorize source text as the user
//! types. The analysis engine behind the HTTP service remains the lexer
//! of record; this one never fails and never drops a character.

mod scanner;
mod token;

pub use scanner::tokenize;
pub use token::{is_keyword, Category, Span, KEYWORDS};
