//! Syntax highlighting for reviewed files.

mod highlighter;

pub use highlighter::{SyntaxHighlighter, DEFAULT_THEME};
