//! View-model handed to the page renderer.
//!
//! Everything here is plain data, rebuilt from scratch by the projector on
//! every state change.

mod projector;

pub use projector::{project_diff, project_file, project_line_comments};

use crate::model::{DiffLineKind, TreeItem};
use serde::Serialize;

/// A comment as displayed at its anchor line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewComment {
    pub start_line: u32,
    pub end_line: u32,
    pub text: String,
    /// Body rendered by the markdown renderer.
    pub rendered: String,
}

/// One line of a plain file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewLine {
    /// 1-based line number.
    pub number: u32,
    pub text: String,
    /// Pre-rendered markup; empty when rendering is off.
    pub html: String,
    pub selected: bool,
    /// Inside the range of at least one comment.
    pub commented: bool,
    /// Comments whose first line is this line.
    pub comments: Vec<ViewComment>,
}

/// A plain file ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewFile {
    pub path: String,
    pub lines: Vec<ViewLine>,
    /// The file is markdown.
    pub markdown_file: bool,
    /// The markdown file is shown as a rendered document instead of lines.
    pub markdown_rendered: bool,
    /// Rendered document, set when `markdown_rendered` is true.
    pub markdown_html: String,
}

/// One line of a diff hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDiffLine {
    pub kind: DiffLineKind,
    pub old_line: Option<u32>,
    pub new_line: Option<u32>,
    pub text: String,
    pub html: String,
    /// Can be clicked and commented on (exists on the new side).
    pub selectable: bool,
    pub selected: bool,
    pub commented: bool,
    pub comments: Vec<ViewComment>,
}

/// A hunk with its header label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDiffHunk {
    pub header: String,
    pub lines: Vec<ViewDiffLine>,
}

/// A diff file ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewDiffFile {
    pub path: String,
    pub hunks: Vec<ViewDiffHunk>,
    pub additions: usize,
    pub deletions: usize,
}

/// Content pane for the selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ViewContent {
    File(ViewFile),
    Diff(ViewDiffFile),
}

/// Everything the page needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewView {
    /// Flattened file tree.
    pub tree: Vec<TreeItem>,
    /// Selected path.
    pub selected_path: String,
    /// Header label, including display ranges when set.
    pub selected_label: String,
    /// Instructions shown above the review.
    pub prompt: String,
    /// Prompt rendered as markdown; empty when there is no prompt.
    pub prompt_html: String,
    pub content: ViewContent,
    /// Current selection, `(0, 0)` when empty.
    pub selection: (u32, u32),
    /// Last validation message.
    pub error: Option<String>,
    pub render_file: bool,
    pub render_comments: bool,
    /// Number of comments so far.
    pub comment_count: usize,
}
