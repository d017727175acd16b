//! Integer line ranges: parsing, normalization and labels.

use crate::error::ValidationError;
use std::collections::HashMap;

/// Inclusive 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Create a range, swapping inverted endpoints.
    pub fn new(start: u32, end: u32) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A single-line range.
    pub fn single(line: u32) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Whether `line` lies inside the range (bounds inclusive).
    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }

    /// Clamp both bounds into `[1, max]`. Returns `None` if nothing is left.
    pub fn clamp_to(&self, max: u32) -> Option<Self> {
        let start = self.start.max(1);
        let end = self.end.min(max);
        (start <= end).then_some(Self { start, end })
    }
}

/// Display ranges keyed by file path, as given on the command line.
pub type RangeMap = HashMap<String, Vec<LineRange>>;

/// Normalize a set of ranges.
///
/// Ranges with a zero bound are dropped, inverted ranges are swapped, the rest
/// are sorted by `(start, end)` and any range starting at or before
/// `previous.end + 1` is merged into the previous one.
pub fn normalize_ranges(ranges: &[LineRange]) -> Vec<LineRange> {
    let mut cleaned: Vec<LineRange> = ranges
        .iter()
        .filter(|r| r.start > 0 && r.end > 0)
        .map(|r| LineRange::new(r.start, r.end))
        .collect();
    cleaned.sort();

    let mut merged: Vec<LineRange> = Vec::with_capacity(cleaned.len());
    for r in cleaned {
        if let Some(last) = merged.last_mut() {
            if r.start <= last.end.saturating_add(1) {
                last.end = last.end.max(r.end);
                continue;
            }
        }
        merged.push(r);
    }
    merged
}

/// Parse a `path:start-end` spec.
///
/// Splits on the first `:` and then the first `-`. Both endpoints must be
/// positive integers; an inverted pair is swapped.
pub fn parse_range_spec(spec: &str) -> Result<(String, LineRange), ValidationError> {
    let invalid = || ValidationError::InvalidRange(spec.to_string());

    let (path, range) = spec.split_once(':').ok_or_else(invalid)?;
    let (start, end) = range.split_once('-').ok_or_else(invalid)?;
    let start: u32 = start.parse().map_err(|_| invalid())?;
    let end: u32 = end.parse().map_err(|_| invalid())?;
    if start == 0 || end == 0 {
        return Err(invalid());
    }

    Ok((path.to_string(), LineRange::new(start, end)))
}

/// Parse repeated range specs into a per-path map.
///
/// Blank values are skipped. Ranges keep their input order per path;
/// normalization happens at projection time.
pub fn parse_range_specs<S: AsRef<str>>(values: &[S]) -> Result<RangeMap, ValidationError> {
    let mut ranges = RangeMap::new();
    for value in values {
        let value = value.as_ref().trim();
        if value.is_empty() {
            continue;
        }
        let (path, range) = parse_range_spec(value)?;
        ranges.entry(path).or_default().push(range);
    }
    Ok(ranges)
}

/// Human label such as `path (lines 5-15, 20-22)`; just the path when there
/// are no ranges.
pub fn format_range_label(path: &str, ranges: &[LineRange]) -> String {
    let normalized = normalize_ranges(ranges);
    if normalized.is_empty() {
        return path.to_string();
    }
    let parts: Vec<String> = normalized
        .iter()
        .map(|r| format!("{}-{}", r.start, r.end))
        .collect();
    format!("{} (lines {})", path, parts.join(", "))
}
