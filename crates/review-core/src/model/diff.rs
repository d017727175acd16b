//! Diff data structures produced by the unified diff parser.
//!
//! Line numbers are 1-based. A side on which a line does not exist is `None`
//! (deleted lines have no new-side number, added lines no old-side number).

use serde::Serialize;

/// A single file's changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffFile {
    /// Path before the change (empty for `/dev/null`).
    pub old_path: String,
    /// Path after the change (empty for `/dev/null`).
    pub new_path: String,
    /// Display path: `new_path` when present, `old_path` otherwise.
    pub path: String,
    /// Change hunks in input order.
    pub hunks: Vec<DiffHunk>,
}

impl DiffFile {
    /// Create an empty diff file with no paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diff file for a single path (old and new side identical).
    pub fn with_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            old_path: path.clone(),
            new_path: path.clone(),
            path,
            hunks: Vec::new(),
        }
    }

    /// Set the old-side path and refresh the display path.
    pub fn set_old_path(&mut self, old_path: impl Into<String>) {
        self.old_path = old_path.into();
        self.refresh_path();
    }

    /// Set the new-side path and refresh the display path.
    pub fn set_new_path(&mut self, new_path: impl Into<String>) {
        self.new_path = new_path.into();
        self.refresh_path();
    }

    fn refresh_path(&mut self) {
        self.path = if self.new_path.is_empty() {
            self.old_path.clone()
        } else {
            self.new_path.clone()
        };
    }

    /// Whether a new-side line number can be selected or commented on.
    ///
    /// Only lines that exist on the new side qualify; deletions never do.
    pub fn is_selectable_line(&self, line: u32) -> bool {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .any(|l| l.is_selectable() && l.new_line == Some(line))
    }

    /// Number of added lines across all hunks.
    pub fn additions(&self) -> usize {
        self.count_kind(DiffLineKind::Addition)
    }

    /// Number of deleted lines across all hunks.
    pub fn deletions(&self) -> usize {
        self.count_kind(DiffLineKind::Deletion)
    }

    fn count_kind(&self, kind: DiffLineKind) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// A contiguous region of changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffHunk {
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version, as declared by the header.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version, as declared by the header.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Header label rebuilt from the stored integers.
    ///
    /// The declared counts are used as-is, even when they disagree with the
    /// number of lines actually present.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

/// A single line in a hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: DiffLineKind,
    /// Line number in old file (context and deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (context and addition).
    pub new_line: Option<u32>,
    /// Line content without the leading marker.
    pub text: String,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(text: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: DiffLineKind::Context,
            old_line: line_no(old_line),
            new_line: line_no(new_line),
            text: text.into(),
        }
    }

    /// Create a new addition line.
    pub fn addition(text: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: DiffLineKind::Addition,
            old_line: None,
            new_line: line_no(new_line),
            text: text.into(),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(text: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: DiffLineKind::Deletion,
            old_line: line_no(old_line),
            new_line: None,
            text: text.into(),
        }
    }

    /// Whether this line can take part in a selection.
    pub fn is_selectable(&self) -> bool {
        self.new_line.is_some() && self.kind != DiffLineKind::Deletion
    }
}

/// Zero is the "absent" line number.
fn line_no(n: u32) -> Option<u32> {
    (n > 0).then_some(n)
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiffLineKind {
    /// Unchanged line.
    #[serde(rename = "context")]
    Context,
    /// Added line (+).
    #[serde(rename = "add")]
    Addition,
    /// Removed line (-).
    #[serde(rename = "del")]
    Deletion,
}

impl DiffLineKind {
    /// Get the marker character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            DiffLineKind::Context => ' ',
            DiffLineKind::Addition => '+',
            DiffLineKind::Deletion => '-',
        }
    }

    /// Short name used by renderers (e.g. as a CSS class).
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffLineKind::Context => "context",
            DiffLineKind::Addition => "add",
            DiffLineKind::Deletion => "del",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_prefers_new_side() {
        let mut file = DiffFile::new();
        file.set_old_path("src/old.rs");
        assert_eq!(file.path, "src/old.rs");

        file.set_new_path("src/new.rs");
        assert_eq!(file.path, "src/new.rs");

        // Deleted file: new side is /dev/null, normalized to empty
        file.set_new_path("");
        assert_eq!(file.path, "src/old.rs");
    }

    #[test]
    fn test_hunk_header_uses_declared_counts() {
        let mut hunk = DiffHunk::new(10, 5, 12, 7);
        hunk.lines.push(DiffLine::context("only one", 10, 12));
        assert_eq!(hunk.header(), "@@ -10,5 +12,7 @@");
    }

    #[test]
    fn test_diff_line_kinds() {
        let ctx = DiffLine::context("unchanged", 5, 5);
        assert_eq!(ctx.kind, DiffLineKind::Context);
        assert_eq!(ctx.old_line, Some(5));
        assert_eq!(ctx.new_line, Some(5));
        assert!(ctx.is_selectable());

        let add = DiffLine::addition("new line", 10);
        assert_eq!(add.old_line, None);
        assert_eq!(add.new_line, Some(10));
        assert!(add.is_selectable());

        let del = DiffLine::deletion("removed line", 8);
        assert_eq!(del.old_line, Some(8));
        assert_eq!(del.new_line, None);
        assert!(!del.is_selectable());
    }

    #[test]
    fn test_zero_cursor_is_absent() {
        let add = DiffLine::addition("x", 0);
        assert_eq!(add.new_line, None);
        assert!(!add.is_selectable());
    }

    #[test]
    fn test_selectable_line_lookup() {
        let mut file = DiffFile::with_path("x.go");
        let mut hunk = DiffHunk::new(1, 2, 1, 3);
        hunk.lines.push(DiffLine::addition("new", 3));
        hunk.lines.push(DiffLine::deletion("old", 2));
        file.hunks.push(hunk);

        assert!(file.is_selectable_line(3));
        assert!(!file.is_selectable_line(2));
        assert_eq!(file.additions(), 1);
        assert_eq!(file.deletions(), 1);
    }
}
