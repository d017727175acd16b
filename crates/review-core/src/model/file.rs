//! Plain files loaded for line review.

use std::path::Path;

/// A loaded file split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as given by the caller.
    pub path: String,
    /// Path with `\` separators replaced by `/`.
    pub path_slash: String,
    /// Raw lines without their terminating newline.
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Build a file from already-decoded text.
    ///
    /// CRLF is normalized to LF before splitting on LF, so a trailing newline
    /// yields a final empty line.
    pub fn from_text(path: impl Into<String>, text: &str) -> Self {
        let path = path.into();
        let lines = text
            .replace("\r\n", "\n")
            .split('\n')
            .map(str::to_string)
            .collect();
        Self {
            path_slash: to_slash(&path),
            path,
            lines,
        }
    }

    /// Number of physical lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the file should be offered as rendered markdown.
    pub fn is_markdown(&self) -> bool {
        is_markdown_path(&self.path)
    }

    /// Full text with lines joined by LF.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Replace Windows separators with forward slashes.
pub fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// `.md` and `.markdown`, case-insensitive.
pub fn is_markdown_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
