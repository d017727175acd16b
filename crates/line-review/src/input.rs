//! Loading review input from disk and stdin.

use anyhow::{Context, Result};
use review_core::{parse_unified_diff, parse_range_specs, ReviewSession, SourceFile};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

/// What to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewInput {
    /// Plain files, in command line order.
    Files(Vec<SourceFile>),
    /// Unified diff text.
    Diff(String),
}

/// Resolve the input: `--diff` file, then files, then a diff piped on stdin.
///
/// Returns `None` when there is nothing to review.
pub fn resolve(diff: Option<&Path>, paths: &[PathBuf]) -> Result<Option<ReviewInput>> {
    if let Some(path) = diff {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read diff {}", path.display()))?;
        return Ok(non_blank_diff(text));
    }

    if !paths.is_empty() {
        return load_files(paths).map(|files| Some(ReviewInput::Files(files)));
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("read diff from stdin")?;
    Ok(non_blank_diff(text))
}

fn non_blank_diff(text: String) -> Option<ReviewInput> {
    (!text.trim().is_empty()).then_some(ReviewInput::Diff(text))
}

/// Read each path as UTF-8 text.
pub fn load_files(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            log::debug!("Loaded {}", path.display());
            Ok(SourceFile::from_text(path.to_string_lossy(), &text))
        })
        .collect()
}

/// Build the session for an input. Display ranges only apply to files.
pub fn build_session(input: ReviewInput, ranges: &[String]) -> Result<ReviewSession> {
    let session = match input {
        ReviewInput::Files(files) => {
            let ranges = parse_range_specs(ranges)?;
            ReviewSession::from_files(files)?.with_ranges(ranges)
        }
        ReviewInput::Diff(text) => {
            let files = parse_unified_diff(&text).context("parse diff")?;
            ReviewSession::from_diff(files)?
        }
    };
    Ok(session)
}
