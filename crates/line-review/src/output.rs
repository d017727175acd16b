//! Writing the final comment list.

use anyhow::{Context, Result};
use review_config::OutputFormat;
use review_core::{encode_json, encode_toon, Comment};
use std::io::Write;

/// Encode comments in the configured format.
pub fn encode(comments: &[Comment], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Toon => encode_toon(comments).context("encode comments as TOON"),
        OutputFormat::Json => encode_json(comments).context("encode comments as JSON"),
    }
}

/// Write the encoded comments followed by a newline.
pub fn emit<W: Write>(mut out: W, comments: &[Comment], format: OutputFormat) -> Result<()> {
    let encoded = encode(comments, format)?;
    writeln!(out, "{}", encoded).context("write comments")?;
    out.flush().context("flush output")?;
    Ok(())
}
