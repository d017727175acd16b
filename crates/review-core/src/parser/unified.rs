//! Parse unified diff text (as produced by `git diff` or `diff -u`).
//!
//! The parser is a single linear scan. Line numbers are assigned by cursor
//! arithmetic starting from each hunk header; the header counts are stored
//! as given and never used for numbering.

use crate::model::{DiffFile, DiffHunk, DiffLine};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Errors that can occur during diff parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line starting with `@@ ` did not match `@@ -O[,oc] +N[,nc] @@`.
    #[error("invalid hunk header at line {line}: {header}")]
    InvalidHunkHeader { line: usize, header: String },

    /// A line number, from a hunk header or reached by counting lines, does
    /// not fit in `u32`.
    #[error("line number out of range at line {line}")]
    LineNumberOutOfRange { line: usize },
}

/// Parse a unified diff into per-file hunks.
///
/// Tolerates diffs without `diff --git` banners, context lines missing their
/// leading space and bare empty lines inside hunks. A malformed hunk header
/// aborts the whole parse.
///
/// # Example
/// ```
/// let files = review_core::parse_unified_diff("--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n+b\n").unwrap();
/// assert_eq!(files[0].path, "x");
/// assert_eq!(files[0].hunks[0].lines.len(), 2);
/// ```
pub fn parse_unified_diff(input: &str) -> Result<Vec<DiffFile>, ParseError> {
    let normalized = input.replace("\r\n", "\n");
    let mut parser = DiffParser::default();

    for (idx, raw) in split_lines(&normalized).enumerate() {
        parser.feed(idx + 1, raw)?;
    }

    let files = parser.finish();
    log::debug!("Parsed {} file(s) from unified diff", files.len());
    Ok(files)
}

/// Split on LF; a terminating newline does not produce an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.strip_suffix('\n').unwrap_or(text).split('\n')
}

#[derive(Debug, Default)]
struct DiffParser {
    files: Vec<DiffFile>,
    current: Option<DiffFile>,
    in_hunk: bool,
    old_cursor: u64,
    new_cursor: u64,
}

impl DiffParser {
    fn feed(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        if let Some(header) = raw.strip_prefix("diff --git ") {
            self.flush();
            let mut file = DiffFile::new();
            if let Some((old, new)) = split_git_header(header) {
                file.set_old_path(normalize_diff_path(old));
                file.set_new_path(normalize_diff_path(new));
            }
            self.current = Some(file);
            return Ok(());
        }

        if let Some(path) = raw.strip_prefix("--- ") {
            self.current_file().set_old_path(normalize_diff_path(path));
            return Ok(());
        }

        if let Some(path) = raw.strip_prefix("+++ ") {
            self.current_file().set_new_path(normalize_diff_path(path));
            return Ok(());
        }

        if raw.starts_with("@@ ") {
            let hunk = parse_hunk_header(line_no, raw)?;
            self.old_cursor = u64::from(hunk.old_start);
            self.new_cursor = u64::from(hunk.new_start);
            self.current_file().hunks.push(hunk);
            self.in_hunk = true;
            return Ok(());
        }

        if !self.in_hunk || raw.starts_with(NO_NEWLINE_MARKER) {
            return Ok(());
        }

        let line = match raw.chars().next() {
            // Bare empty line: an unchanged blank line whose leading space was stripped
            None => self.context(line_no, "")?,
            Some(' ') => self.context(line_no, &raw[1..])?,
            Some('+') => {
                let line = DiffLine::addition(&raw[1..], line_number(self.new_cursor, line_no)?);
                self.new_cursor += 1;
                line
            }
            Some('-') => {
                let line = DiffLine::deletion(&raw[1..], line_number(self.old_cursor, line_no)?);
                self.old_cursor += 1;
                line
            }
            // Unknown marker: keep the text verbatim as context
            Some(_) => self.context(line_no, raw)?,
        };

        if let Some(hunk) = self.current.as_mut().and_then(|f| f.hunks.last_mut()) {
            hunk.lines.push(line);
        }
        Ok(())
    }

    fn context(&mut self, line_no: usize, text: &str) -> Result<DiffLine, ParseError> {
        let line = DiffLine::context(
            text,
            line_number(self.old_cursor, line_no)?,
            line_number(self.new_cursor, line_no)?,
        );
        self.old_cursor += 1;
        self.new_cursor += 1;
        Ok(line)
    }

    /// The open file, creating one implicitly for banner-less diffs.
    fn current_file(&mut self) -> &mut DiffFile {
        self.current.get_or_insert_with(DiffFile::new)
    }

    fn flush(&mut self) {
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
        self.in_hunk = false;
    }

    fn finish(mut self) -> Vec<DiffFile> {
        self.flush();
        self.files
    }
}

/// Narrow a cursor to a line number.
fn line_number(cursor: u64, line_no: usize) -> Result<u32, ParseError> {
    u32::try_from(cursor).map_err(|_| ParseError::LineNumberOutOfRange { line: line_no })
}

/// Parse `@@ -O[,oc] +N[,nc] @@...`; a missing count defaults to 1.
fn parse_hunk_header(line_no: usize, line: &str) -> Result<DiffHunk, ParseError> {
    static HUNK_HEADER: OnceLock<Regex> = OnceLock::new();

    let re = HUNK_HEADER.get_or_init(|| {
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
    });

    let caps = re.captures(line).ok_or_else(|| ParseError::InvalidHunkHeader {
        line: line_no,
        header: line.to_string(),
    })?;
    // Digits only: a failed parse is an overflow
    let number = |idx: usize| -> Result<u32, ParseError> {
        match caps.get(idx) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| ParseError::LineNumberOutOfRange { line: line_no }),
            None => Ok(1),
        }
    };

    Ok(DiffHunk::new(number(1)?, number(2)?, number(3)?, number(4)?))
}

/// Split the `a/old b/new` part of a `diff --git` banner.
fn split_git_header(header: &str) -> Option<(&str, &str)> {
    let idx = header.rfind(" b/")?;
    Some((&header[..idx], &header[idx + 1..]))
}

/// Normalize a `---`/`+++` path.
///
/// Drops a trailing tab-separated timestamp, `a/`/`b/` and `./` prefixes, and
/// maps `/dev/null` to the empty string.
pub fn normalize_diff_path(path: &str) -> String {
    let path = path.split('\t').next().unwrap_or(path).trim();
    if path == "/dev/null" {
        return String::new();
    }
    let path = path
        .strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path);
    let path = path.strip_prefix("./").unwrap_or(path);
    path.replace('\\', "/")
}
