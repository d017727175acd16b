//! Line-anchored review comments.

use serde::{Deserialize, Serialize};

/// A comment anchored to a line range of one file.
///
/// In diff mode the range is in new-side numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// File path.
    pub path: String,
    /// First line of the range; the comment is displayed here.
    pub start_line: u32,
    /// Last line of the range.
    pub end_line: u32,
    /// Comment body (markdown).
    pub text: String,
}

impl Comment {
    /// Create a new comment.
    pub fn new(path: impl Into<String>, start_line: u32, end_line: u32, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            start_line,
            end_line,
            text: text.into(),
        }
    }

    /// Whether the comment covers `line` (bounds inclusive).
    pub fn covers(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// Whether the comment body is displayed at `line`.
    ///
    /// Multi-line comments are shown once, at their first line.
    pub fn is_anchored_at(&self, line: u32) -> bool {
        self.start_line == line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_and_anchor() {
        let c = Comment::new("a.rs", 5, 7, "range");
        assert!(!c.covers(4));
        assert!(c.covers(5));
        assert!(c.covers(6));
        assert!(c.covers(7));
        assert!(!c.covers(8));

        assert!(c.is_anchored_at(5));
        assert!(!c.is_anchored_at(6));
        assert!(!c.is_anchored_at(7));
    }

    #[test]
    fn test_single_line() {
        let c = Comment::new("a.rs", 3, 3, "one");
        assert!(c.covers(3));
        assert!(c.is_anchored_at(3));
        assert!(!c.covers(4));
    }
}
