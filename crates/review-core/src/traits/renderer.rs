//! Traits for turning raw text into display markup.
//!
//! The view projector only indexes into what a [`LineRenderer`] returns and
//! never interprets the markup itself.

/// Renders the lines of one file to per-line markup.
///
/// # Example
///
/// ```
/// use review_core::{LineRenderer, PlainText};
///
/// let mut renderer = PlainText;
/// let html = renderer.render_lines("a.rs", &["a < b".to_string()]);
/// assert_eq!(html, vec!["a &lt; b".to_string()]);
/// ```
pub trait LineRenderer {
    /// Render `lines` of `path`.
    ///
    /// The result should have one entry per input line. Missing entries are
    /// treated as plain text by the projector.
    fn render_lines(&mut self, path: &str, lines: &[String]) -> Vec<String>;
}

/// Renders markdown (comment bodies and markdown files) to HTML.
pub trait MarkdownRenderer {
    fn render(&self, source: &str) -> String;
}

/// Escapes text without any highlighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl LineRenderer for PlainText {
    fn render_lines(&mut self, _path: &str, lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| htmlescape::encode_minimal(l)).collect()
    }
}

impl MarkdownRenderer for PlainText {
    fn render(&self, source: &str) -> String {
        htmlescape::encode_minimal(source)
    }
}
