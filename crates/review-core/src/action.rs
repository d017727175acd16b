//! Review Session Actions
//!
//! Tagged actions a review session can process. The HTTP layer maps form
//! posts to these and dispatches them to [`crate::ReviewSession`].

/// Actions that can be performed on a review session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    /// Show another file. Unknown paths leave the session unchanged.
    SelectFile(String),
    /// Click a line; `extend` is a shift-click growing the selection from
    /// its anchor. Non-positive lines are ignored.
    SelectLine { line: i64, extend: bool },
    /// Attach a comment to the current selection.
    AddComment(String),
    /// Drop the selection without commenting.
    CancelComment,
    /// Flip markdown/line mode for a markdown file, code highlighting
    /// otherwise.
    ToggleFileRender,
    /// Flip rendered/raw display of comment bodies.
    ToggleCommentRender,
    /// End the review.
    Finish,
}
