//! Encoding of the final comment list.

mod json;
mod toon;

pub use json::{decode_json, encode_json};
pub use toon::{decode_toon, encode_toon, ToonError};
