//! Events emitted by the review session for the caller to handle.

use crate::error::ValidationError;
use crate::model::Comment;

/// Events emitted by [`crate::ReviewSession::handle_action`].
///
/// The session performs no I/O. The caller reacts to these, e.g. by shutting
/// the server down on [`ReviewEvent::Finished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEvent {
    /// A different file is shown.
    FileSelected {
        /// Path of the selected file.
        path: String,
    },

    /// The line selection changed. `(0, 0)` means cleared.
    SelectionChanged {
        path: String,
        start: u32,
        end: u32,
    },

    /// A comment was appended.
    CommentAdded(Comment),

    /// The action was rejected; state is unchanged.
    ValidationFailed(ValidationError),

    /// The reviewer is done. Carries every comment in creation order.
    Finished(Vec<Comment>),
}
