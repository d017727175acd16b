//! Markdown to HTML via pulldown-cmark.

use crate::traits::MarkdownRenderer;
use pulldown_cmark::{html, Event, Options, Parser};

/// Renders CommonMark with tables, strikethrough and task lists.
///
/// Raw HTML in the source is emitted as escaped text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkRenderer;

impl CmarkRenderer {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, Self::options()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let out = CmarkRenderer.render("**bold** and `code`");
        assert!(out.contains("<strong>bold</strong>"));
        assert!(out.contains("<code>code</code>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = CmarkRenderer.render("hi <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_extensions() {
        let out = CmarkRenderer.render("~~gone~~\n\n- [x] done\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(out.contains("<del>gone</del>"));
        assert!(out.contains("checkbox"));
        assert!(out.contains("<table>"));
    }
}
