//! Recoverable errors surfaced to the reviewer.

use thiserror::Error;

/// User-facing validation failures.
///
/// These never change session state; the message is shown on the current
/// view until the next successful action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Comment text was empty or whitespace only.
    #[error("comment text is required")]
    EmptyComment,

    /// No line or range was selected.
    #[error("select a line or range first")]
    EmptySelection,

    /// A `path:start-end` range could not be parsed.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The path is not part of the review.
    #[error("unknown file: {0}")]
    UnknownPath(String),
}

/// Errors building a review session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No files were given.
    #[error("no files provided")]
    NoFiles,

    /// The diff parsed successfully but contained no files.
    #[error("no files in diff")]
    EmptyDiff,
}
