//! Diff parsing.

mod unified;

pub use unified::{normalize_diff_path, parse_unified_diff, ParseError};
