//! # review-core
//!
//! Line-anchored code review engine: parses unified diffs, loads plain files,
//! tracks a line selection and an append-only list of comments, and projects
//! all of it into plain view-model data.
//!
//! ## Design Principles
//!
//! The crate performs no I/O. It receives already-decoded text and emits
//! events, so the HTTP front end, the renderers and the output writer stay
//! outside of it:
//!
//! - [`parse_unified_diff`] turns diff text into [`DiffFile`]s with dual
//!   (old/new side) line numbering.
//! - [`ReviewSession`] holds all mutable state and is driven by
//!   [`ReviewAction`]s, answering with [`ReviewEvent`]s.
//! - [`ReviewSession::view`] rebuilds a [`ReviewView`] on every change.
//!
//! ## Usage
//!
//! ```rust
//! use review_core::{parse_unified_diff, PlainText, ReviewAction, ReviewSession};
//!
//! let diff = "--- a/x.rs\n+++ b/x.rs\n@@ -1 +1,2 @@\n a\n+b\n";
//! let mut session = ReviewSession::from_diff(parse_unified_diff(diff)?)?;
//!
//! session.handle_action(ReviewAction::SelectLine { line: 2, extend: false });
//! session.handle_action(ReviewAction::AddComment("why?".to_string()));
//!
//! let view = session.view(&mut PlainText, &PlainText);
//! assert_eq!(view.comment_count, 1);
//! assert_eq!(
//!     review_core::encode_toon(session.comments())?,
//!     "comments[1]{end_line,path,start_line,text}:\n  2,x.rs,2,why?"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod action;
pub mod error;
pub mod event;
pub mod highlight;
pub mod markdown;
pub mod model;
pub mod output;
pub mod parser;
pub mod state;
pub mod traits;
pub mod view;

// Re-export commonly used types
pub use action::ReviewAction;
pub use error::{SessionError, ValidationError};
pub use event::ReviewEvent;
pub use highlight::{SyntaxHighlighter, DEFAULT_THEME};
pub use markdown::CmarkRenderer;
pub use model::{
    format_range_label, normalize_ranges, parse_range_spec, parse_range_specs, Comment, DiffFile,
    DiffHunk, DiffLine, DiffLineKind, LineRange, RangeMap, SourceFile, TreeItem, TreeNode,
};
pub use output::{decode_json, decode_toon, encode_json, encode_toon, ToonError};
pub use parser::{parse_unified_diff, ParseError};
pub use state::{CommentStore, ReviewMode, ReviewSession, Selection};
pub use traits::{LineRenderer, MarkdownRenderer, PlainText};
pub use view::{
    ReviewView, ViewComment, ViewContent, ViewDiffFile, ViewDiffHunk, ViewDiffLine, ViewFile,
    ViewLine,
};
