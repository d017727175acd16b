//! Data models for reviewed files and diffs.

mod comment;
mod diff;
mod file;
mod file_tree;
mod range;

pub use comment::Comment;
pub use diff::{DiffFile, DiffHunk, DiffLine, DiffLineKind};
pub use file::{is_markdown_path, to_slash, SourceFile};
pub use file_tree::{ChildKey, TreeItem, TreeNode};
pub use range::{
    format_range_label, normalize_ranges, parse_range_spec, parse_range_specs, LineRange,
    RangeMap,
};
