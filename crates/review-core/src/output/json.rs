//! JSON output: `{"comments": [...]}`.

use crate::model::Comment;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CommentsDocRef<'a> {
    comments: &'a [Comment],
}

#[derive(Deserialize)]
struct CommentsDoc {
    comments: Vec<Comment>,
}

/// Encode comments as pretty-printed JSON.
pub fn encode_json(comments: &[Comment]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CommentsDocRef { comments })
}

/// Decode the document produced by [`encode_json`].
pub fn decode_json(input: &str) -> Result<Vec<Comment>, serde_json::Error> {
    serde_json::from_str::<CommentsDoc>(input).map(|doc| doc.comments)
}
