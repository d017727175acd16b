//! Session state: selection, comments and the action reducer.

mod comment_store;
mod selection;
mod session;

pub use comment_store::CommentStore;
pub use selection::Selection;
pub use session::{ReviewMode, ReviewSession};
