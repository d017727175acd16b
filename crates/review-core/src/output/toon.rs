//! TOON tabular encoding of comments.
//!
//! ```text
//! comments[2]{end_line,path,start_line,text}:
//!   29,README.md,29,This is a comment
//!   40,README.md,38,"Needs a test, see: #12"
//! ```
//!
//! Rows are serialized with their fields in lexicographic order; quoting and
//! escaping follow the TOON format via `toon-format`.

use crate::model::Comment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toon_format::{decode_default, encode_default};

/// Errors from the TOON codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToonError {
    #[error("encode comments as TOON: {0}")]
    Encode(String),

    /// Malformed table: bad header, wrong row count, missing field or a
    /// non-numeric line number.
    #[error("decode TOON comments: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct CommentRow<'a> {
    end_line: u32,
    path: &'a str,
    start_line: u32,
    text: &'a str,
}

#[derive(Serialize)]
struct CommentsDocRef<'a> {
    comments: Vec<CommentRow<'a>>,
}

#[derive(Deserialize)]
struct CommentsDoc {
    comments: Vec<Comment>,
}

/// Encode comments in creation order.
pub fn encode_toon(comments: &[Comment]) -> Result<String, ToonError> {
    let doc = CommentsDocRef {
        comments: comments
            .iter()
            .map(|c| CommentRow {
                end_line: c.end_line,
                path: &c.path,
                start_line: c.start_line,
                text: &c.text,
            })
            .collect(),
    };
    encode_default(&doc).map_err(|e| ToonError::Encode(e.to_string()))
}

/// Decode a table produced by [`encode_toon`]. Header fields may come in
/// any order.
pub fn decode_toon(input: &str) -> Result<Vec<Comment>, ToonError> {
    let normalized = input.replace("\r\n", "\n");
    decode_default::<CommentsDoc>(normalized.trim_end())
        .map(|doc| doc.comments)
        .map_err(|e| ToonError::Decode(e.to_string()))
}
