//! Projects files, diffs, selection and comments into view-models.
//!
//! All functions here are pure: entities are only read, and identical inputs
//! give identical output.

use super::{ViewComment, ViewDiffFile, ViewDiffHunk, ViewDiffLine, ViewFile, ViewLine};
use crate::model::{normalize_ranges, Comment, DiffFile, LineRange, SourceFile};
use crate::state::Selection;
use crate::traits::{LineRenderer, MarkdownRenderer};

/// Comment flags for one line of `path`.
///
/// Returns whether any comment's range contains `line`, and the comments
/// anchored at `line` (those starting there), in insertion order.
pub fn project_line_comments(
    path: &str,
    line: u32,
    comments: &[Comment],
    markdown: &dyn MarkdownRenderer,
) -> (bool, Vec<ViewComment>) {
    let mut commented = false;
    let mut anchored = Vec::new();

    for comment in comments.iter().filter(|c| c.path == path) {
        if comment.covers(line) {
            commented = true;
        }
        if comment.is_anchored_at(line) {
            anchored.push(ViewComment {
                start_line: comment.start_line,
                end_line: comment.end_line,
                text: comment.text.clone(),
                rendered: markdown.render(&comment.text),
            });
        }
    }

    (commented, anchored)
}

/// Project a plain file.
///
/// With `display_ranges`, only lines inside their normalized union are
/// produced; bounds past the file are clamped to `[1, line_count]`.
/// `rendered` is indexed by line position; missing entries leave `html` empty.
pub fn project_file(
    file: &SourceFile,
    comments: &[Comment],
    selection: Selection,
    rendered: Option<&[String]>,
    display_ranges: Option<&[LineRange]>,
    markdown: &dyn MarkdownRenderer,
) -> ViewFile {
    let line_count = u32::try_from(file.line_count()).unwrap_or(u32::MAX);

    let numbers: Vec<u32> = match display_ranges {
        Some(ranges) if !ranges.is_empty() => normalize_ranges(ranges)
            .iter()
            .filter_map(|r| r.clamp_to(line_count))
            .flat_map(|r| r.start..=r.end)
            .collect(),
        _ => (1..=line_count).collect(),
    };

    let lines = numbers
        .into_iter()
        .map(|number| {
            let idx = (number - 1) as usize;
            let (commented, line_comments) =
                project_line_comments(&file.path, number, comments, markdown);
            ViewLine {
                number,
                text: file.lines[idx].clone(),
                html: rendered
                    .and_then(|r| r.get(idx))
                    .cloned()
                    .unwrap_or_default(),
                selected: selection.contains(number),
                commented,
                comments: line_comments,
            }
        })
        .collect();

    ViewFile {
        path: file.path.clone(),
        lines,
        markdown_file: file.is_markdown(),
        markdown_rendered: false,
        markdown_html: String::new(),
    }
}

/// Project a diff file.
///
/// Only lines with a new-side number can be selected or carry comments.
/// When a renderer is given each hunk's lines are rendered as one block.
pub fn project_diff(
    file: &DiffFile,
    comments: &[Comment],
    selection: Selection,
    mut renderer: Option<&mut dyn LineRenderer>,
    markdown: &dyn MarkdownRenderer,
) -> ViewDiffFile {
    let hunks = file
        .hunks
        .iter()
        .map(|hunk| {
            let rendered = renderer.as_deref_mut().map(|r| {
                let texts: Vec<String> = hunk.lines.iter().map(|l| l.text.clone()).collect();
                r.render_lines(&file.path, &texts)
            });

            let lines = hunk
                .lines
                .iter()
                .enumerate()
                .map(|(idx, line)| {
                    let selectable = line.is_selectable();
                    let (commented, line_comments) = match line.new_line {
                        Some(n) => project_line_comments(&file.path, n, comments, markdown),
                        None => (false, Vec::new()),
                    };
                    ViewDiffLine {
                        kind: line.kind,
                        old_line: line.old_line,
                        new_line: line.new_line,
                        text: line.text.clone(),
                        html: rendered
                            .as_ref()
                            .and_then(|r| r.get(idx))
                            .cloned()
                            .unwrap_or_default(),
                        selectable,
                        selected: selectable && line.new_line.is_some_and(|n| selection.contains(n)),
                        commented,
                        comments: line_comments,
                    }
                })
                .collect();

            ViewDiffHunk {
                header: hunk.header(),
                lines,
            }
        })
        .collect();

    ViewDiffFile {
        path: file.path.clone(),
        hunks,
        additions: file.additions(),
        deletions: file.deletions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiffHunk, DiffLine, DiffLineKind};
    use crate::traits::PlainText;
    use pretty_assertions::assert_eq;

    fn source(n: usize) -> SourceFile {
        let text: Vec<String> = (1..=n).map(|i| format!("line {}", i)).collect();
        SourceFile::from_text("a.go", &text.join("\n"))
    }

    fn selection(start: u32, end: u32) -> Selection {
        Selection { start, end }
    }

    fn sample_diff() -> DiffFile {
        let mut file = DiffFile::with_path("hello.txt");
        let mut hunk = DiffHunk::new(1, 3, 1, 4);
        hunk.lines.push(DiffLine::context("line1", 1, 1));
        hunk.lines.push(DiffLine::deletion("line2", 2));
        hunk.lines.push(DiffLine::addition("line2-new", 2));
        hunk.lines.push(DiffLine::context("line3", 3, 3));
        hunk.lines.push(DiffLine::addition("line4", 4));
        file.hunks.push(hunk);
        file
    }

    /// Wraps every line in brackets so tests can see the markup was used.
    struct Brackets;

    impl LineRenderer for Brackets {
        fn render_lines(&mut self, _path: &str, lines: &[String]) -> Vec<String> {
            lines.iter().map(|l| format!("[{}]", l)).collect()
        }
    }

    #[test]
    fn test_comment_marks_range_and_anchors_once() {
        let comments = vec![Comment::new("a.go", 5, 7, "range note")];
        let view = project_file(&source(10), &comments, Selection::empty(), None, None, &PlainText);

        let commented: Vec<u32> = view
            .lines
            .iter()
            .filter(|l| l.commented)
            .map(|l| l.number)
            .collect();
        assert_eq!(commented, vec![5, 6, 7]);

        let anchored: Vec<u32> = view
            .lines
            .iter()
            .filter(|l| !l.comments.is_empty())
            .map(|l| l.number)
            .collect();
        assert_eq!(anchored, vec![5]);
        assert_eq!(view.lines[4].comments[0].rendered, "range note");
    }

    #[test]
    fn test_comments_on_other_paths_are_ignored() {
        let comments = vec![Comment::new("b.go", 1, 1, "elsewhere")];
        let view = project_file(&source(2), &comments, Selection::empty(), None, None, &PlainText);
        assert!(view.lines.iter().all(|l| !l.commented && l.comments.is_empty()));
    }

    #[test]
    fn test_selection_flags() {
        let view = project_file(&source(6), &[], selection(2, 4), None, None, &PlainText);
        let selected: Vec<u32> = view
            .lines
            .iter()
            .filter(|l| l.selected)
            .map(|l| l.number)
            .collect();
        assert_eq!(selected, vec![2, 3, 4]);
    }

    #[test]
    fn test_display_ranges_are_normalized_and_clamped() {
        let ranges = [
            LineRange::new(9, 40),
            LineRange::new(2, 3),
            LineRange::new(3, 4),
        ];
        let view = project_file(&source(10), &[], Selection::empty(), None, Some(&ranges), &PlainText);
        let numbers: Vec<u32> = view.lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 3, 4, 9, 10]);
        assert_eq!(view.lines[0].text, "line 2");
    }

    #[test]
    fn test_display_range_past_end_yields_nothing() {
        let ranges = [LineRange::new(50, 60)];
        let view = project_file(&source(3), &[], Selection::empty(), None, Some(&ranges), &PlainText);
        assert!(view.lines.is_empty());
    }

    #[test]
    fn test_rendered_lines_are_indexed_by_position() {
        let rendered = vec!["<b>1</b>".to_string()];
        let view = project_file(&source(2), &[], Selection::empty(), Some(&rendered), None, &PlainText);
        assert_eq!(view.lines[0].html, "<b>1</b>");
        assert_eq!(view.lines[1].html, "");
    }

    #[test]
    fn test_markdown_flag() {
        let file = SourceFile::from_text("README.md", "# hi");
        let view = project_file(&file, &[], Selection::empty(), None, None, &PlainText);
        assert!(view.markdown_file);
        assert!(!view.markdown_rendered);
    }

    #[test]
    fn test_diff_selection_skips_deletions() {
        let view = project_diff(&sample_diff(), &[], selection(1, 4), None, &PlainText);
        let hunk = &view.hunks[0];

        assert_eq!(hunk.header, "@@ -1,3 +1,4 @@");
        for line in &hunk.lines {
            if line.kind == DiffLineKind::Deletion {
                assert!(!line.selectable);
                assert!(!line.selected);
            } else {
                assert!(line.selectable);
                assert!(line.selected);
            }
        }
    }

    #[test]
    fn test_diff_addition_at_selected_line() {
        let view = project_diff(&sample_diff(), &[], selection(2, 2), None, &PlainText);
        let lines = &view.hunks[0].lines;
        assert!(!lines[1].selected);
        assert!(lines[2].selectable);
        assert!(lines[2].selected);
        assert!(!lines[0].selected);
    }

    #[test]
    fn test_diff_comments_use_new_side_numbers() {
        let comments = vec![Comment::new("hello.txt", 2, 3, "check this")];
        let view = project_diff(&sample_diff(), &comments, Selection::empty(), None, &PlainText);
        let lines = &view.hunks[0].lines;

        // The deletion's old-side 2 must not pick up the comment
        assert!(!lines[1].commented);
        assert!(lines[1].comments.is_empty());

        assert!(lines[2].commented);
        assert_eq!(lines[2].comments.len(), 1);
        assert!(lines[3].commented);
        assert!(lines[3].comments.is_empty());
        assert!(!lines[4].commented);
    }

    #[test]
    fn test_diff_header_uses_declared_counts() {
        let mut file = sample_diff();
        file.hunks[0].old_count = 99;
        let view = project_diff(&file, &[], Selection::empty(), None, &PlainText);
        assert_eq!(view.hunks[0].header, "@@ -1,99 +1,4 @@");
        assert_eq!((view.additions, view.deletions), (2, 1));
    }

    #[test]
    fn test_diff_rendering_per_hunk() {
        let mut renderer = Brackets;
        let view = project_diff(
            &sample_diff(),
            &[],
            Selection::empty(),
            Some(&mut renderer),
            &PlainText,
        );
        assert_eq!(view.hunks[0].lines[2].html, "[line2-new]");

        let plain = project_diff(&sample_diff(), &[], Selection::empty(), None, &PlainText);
        assert_eq!(plain.hunks[0].lines[2].html, "");
    }

    #[test]
    fn test_projection_is_idempotent() {
        let comments = vec![Comment::new("hello.txt", 1, 1, "x")];
        let a = project_diff(&sample_diff(), &comments, selection(1, 2), None, &PlainText);
        let b = project_diff(&sample_diff(), &comments, selection(1, 2), None, &PlainText);
        assert_eq!(a, b);
    }
}
