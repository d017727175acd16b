//! Append-only store of review comments.

use crate::model::Comment;

/// Comments in creation order.
///
/// There is no edit or delete; the list is the review's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentStore {
    comments: Vec<Comment>,
}

impl CommentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment.
    pub fn push(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// All comments in insertion order.
    pub fn all(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
