//! Review session state and its action reducer.

use super::{CommentStore, Selection};
use crate::action::ReviewAction;
use crate::error::{SessionError, ValidationError};
use crate::event::ReviewEvent;
use crate::model::{
    format_range_label, is_markdown_path, Comment, DiffFile, LineRange, RangeMap, SourceFile,
    TreeNode,
};
use crate::traits::{LineRenderer, MarkdownRenderer, PlainText};
use crate::view::{project_diff, project_file, ReviewView, ViewContent, ViewDiffFile, ViewFile};
use std::collections::HashMap;

/// What is being reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewMode {
    /// Plain files, addressed by line number.
    File,
    /// A unified diff, addressed by new-side line number.
    Diff,
}

/// All state of one review.
///
/// Loaded files and diffs are read-only after construction; the comment
/// store is the only growing aggregate.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    mode: ReviewMode,
    files: Vec<SourceFile>,
    diff_files: Vec<DiffFile>,
    /// Navigation tree, built once from the file set.
    tree: TreeNode,
    selected_path: String,
    selection: Selection,
    comments: CommentStore,
    /// Per-path display ranges (file mode only).
    ranges: RangeMap,
    /// Highlight code lines.
    render_file: bool,
    /// Show comment bodies as rendered markdown.
    render_comments: bool,
    /// Per-path markdown mode; absent means rendered.
    markdown_render: HashMap<String, bool>,
    prompt: String,
    error: Option<ValidationError>,
    finished: bool,
}

impl ReviewSession {
    fn new(mode: ReviewMode, files: Vec<SourceFile>, diff_files: Vec<DiffFile>) -> Self {
        let (selected_path, tree) = match mode {
            ReviewMode::File => (
                files[0].path.clone(),
                TreeNode::from_paths(files.iter().map(|f| (f.path.as_str(), f.path_slash.as_str()))),
            ),
            ReviewMode::Diff => {
                let slash: Vec<(String, String)> = diff_files
                    .iter()
                    .map(|f| (f.path.clone(), f.path.replace('\\', "/")))
                    .collect();
                (
                    diff_files[0].path.clone(),
                    TreeNode::from_paths(slash.iter().map(|(p, s)| (p.as_str(), s.as_str()))),
                )
            }
        };

        Self {
            mode,
            files,
            diff_files,
            tree,
            selected_path,
            selection: Selection::empty(),
            comments: CommentStore::new(),
            ranges: RangeMap::new(),
            render_file: true,
            render_comments: true,
            markdown_render: HashMap::new(),
            prompt: String::new(),
            error: None,
            finished: false,
        }
    }

    /// Start a review of plain files. The first file is selected.
    pub fn from_files(files: Vec<SourceFile>) -> Result<Self, SessionError> {
        if files.is_empty() {
            return Err(SessionError::NoFiles);
        }
        log::info!("Starting file review of {} file(s)", files.len());
        Ok(Self::new(ReviewMode::File, files, Vec::new()))
    }

    /// Start a review of a parsed diff. The first file is selected.
    pub fn from_diff(diff_files: Vec<DiffFile>) -> Result<Self, SessionError> {
        if diff_files.is_empty() {
            return Err(SessionError::EmptyDiff);
        }
        log::info!("Starting diff review of {} file(s)", diff_files.len());
        Ok(Self::new(ReviewMode::Diff, Vec::new(), diff_files))
    }

    /// Restrict displayed lines per path.
    pub fn with_ranges(mut self, ranges: RangeMap) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set the instructions shown to the reviewer.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set whether code lines are highlighted initially.
    pub fn with_render_file(mut self, render: bool) -> Self {
        self.render_file = render;
        self
    }

    /// Set whether comment bodies are rendered initially.
    pub fn with_render_comments(mut self, render: bool) -> Self {
        self.render_comments = render;
        self
    }

    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    pub fn selected_path(&self) -> &str {
        &self.selected_path
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Comments in creation order.
    pub fn comments(&self) -> &[Comment] {
        self.comments.all()
    }

    /// Last validation failure, cleared by the next accepted action.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the markdown file at `path` is shown rendered.
    pub fn markdown_rendered(&self, path: &str) -> bool {
        self.markdown_render.get(path).copied().unwrap_or(true)
    }

    fn has_path(&self, path: &str) -> bool {
        match self.mode {
            ReviewMode::File => self.files.iter().any(|f| f.path == path),
            ReviewMode::Diff => self.diff_files.iter().any(|f| f.path == path),
        }
    }

    fn selected_file(&self) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == self.selected_path)
    }

    fn selected_diff(&self) -> Option<&DiffFile> {
        self.diff_files.iter().find(|f| f.path == self.selected_path)
    }

    /// Handle an action and return any events to process.
    ///
    /// Every transition is applied whole or not at all. After
    /// [`ReviewAction::Finish`] further actions are ignored.
    pub fn handle_action(&mut self, action: ReviewAction) -> Vec<ReviewEvent> {
        if self.finished {
            log::debug!("Ignoring {:?} after finish", action);
            return Vec::new();
        }

        match action {
            ReviewAction::SelectFile(path) => self.select_file(path),
            ReviewAction::SelectLine { line, extend } => self.select_line(line, extend),
            ReviewAction::AddComment(text) => self.add_comment(&text),
            ReviewAction::CancelComment => {
                self.selection.clear();
                self.error = None;
                vec![self.selection_changed()]
            }
            ReviewAction::ToggleFileRender => {
                if self.mode == ReviewMode::File && is_markdown_path(&self.selected_path) {
                    let rendered = self
                        .markdown_render
                        .entry(self.selected_path.clone())
                        .or_insert(true);
                    *rendered = !*rendered;
                    log::debug!("Markdown render for {}: {}", self.selected_path, rendered);
                } else {
                    self.render_file = !self.render_file;
                }
                Vec::new()
            }
            ReviewAction::ToggleCommentRender => {
                self.render_comments = !self.render_comments;
                Vec::new()
            }
            ReviewAction::Finish => {
                self.finished = true;
                log::info!("Review finished with {} comment(s)", self.comments.len());
                vec![ReviewEvent::Finished(self.comments.all().to_vec())]
            }
        }
    }

    fn select_file(&mut self, path: String) -> Vec<ReviewEvent> {
        if path.is_empty() {
            return Vec::new();
        }
        if !self.has_path(&path) {
            log::debug!("Ignoring selection of unknown file {}", path);
            return vec![ReviewEvent::ValidationFailed(ValidationError::UnknownPath(path))];
        }

        self.selected_path = path.clone();
        self.selection.clear();
        self.error = None;
        vec![ReviewEvent::FileSelected { path }]
    }

    fn select_line(&mut self, line: i64, extend: bool) -> Vec<ReviewEvent> {
        let Ok(line) = u32::try_from(line) else {
            return Vec::new();
        };
        if line == 0 {
            return Vec::new();
        }
        if self.mode == ReviewMode::Diff
            && !self
                .selected_diff()
                .is_some_and(|f| f.is_selectable_line(line))
        {
            return Vec::new();
        }

        if extend {
            self.selection.extend(line);
        } else {
            self.selection.click(line);
        }
        self.error = None;
        vec![self.selection_changed()]
    }

    fn add_comment(&mut self, text: &str) -> Vec<ReviewEvent> {
        let text = text.trim();
        let Some(range) = self.validate_comment(text) else {
            return self
                .error
                .clone()
                .map(ReviewEvent::ValidationFailed)
                .into_iter()
                .collect();
        };

        let comment = Comment::new(self.selected_path.clone(), range.start, range.end, text);
        log::info!(
            "Comment added on {} lines {}-{}",
            comment.path,
            comment.start_line,
            comment.end_line
        );
        self.comments.push(comment.clone());
        self.selection.clear();
        self.error = None;
        vec![ReviewEvent::CommentAdded(comment)]
    }

    /// Checks text first, then selection; records the failure.
    fn validate_comment(&mut self, text: &str) -> Option<LineRange> {
        let result = if text.is_empty() {
            Err(ValidationError::EmptyComment)
        } else {
            self.selection.range().ok_or(ValidationError::EmptySelection)
        };

        match result {
            Ok(range) => Some(range),
            Err(err) => {
                log::debug!("Rejected comment: {}", err);
                self.error = Some(err);
                None
            }
        }
    }

    fn selection_changed(&self) -> ReviewEvent {
        ReviewEvent::SelectionChanged {
            path: self.selected_path.clone(),
            start: self.selection.start,
            end: self.selection.end,
        }
    }

    /// Project the current state into a view-model.
    ///
    /// `renderer` highlights code lines when code rendering is on; `markdown`
    /// renders markdown documents, the prompt and (when enabled) comment
    /// bodies.
    pub fn view(
        &self,
        renderer: &mut dyn LineRenderer,
        markdown: &dyn MarkdownRenderer,
    ) -> ReviewView {
        let comment_markdown: &dyn MarkdownRenderer = if self.render_comments {
            markdown
        } else {
            &PlainText
        };
        let comments = self.comments.all();

        let (content, selected_label) = match self.mode {
            ReviewMode::File => {
                let ranges = self.ranges.get(&self.selected_path).map(Vec::as_slice);
                let label = format_range_label(&self.selected_path, ranges.unwrap_or_default());
                let view = match self.selected_file() {
                    Some(file) if file.is_markdown() && self.markdown_rendered(&file.path) => {
                        ViewFile {
                            path: file.path.clone(),
                            lines: Vec::new(),
                            markdown_file: true,
                            markdown_rendered: true,
                            markdown_html: markdown.render(&file.text()),
                        }
                    }
                    Some(file) => {
                        let rendered = self
                            .render_file
                            .then(|| renderer.render_lines(&file.path, &file.lines));
                        project_file(
                            file,
                            comments,
                            self.selection,
                            rendered.as_deref(),
                            ranges,
                            comment_markdown,
                        )
                    }
                    None => ViewFile {
                        path: self.selected_path.clone(),
                        ..ViewFile::default()
                    },
                };
                (ViewContent::File(view), label)
            }
            ReviewMode::Diff => {
                let view = match self.selected_diff() {
                    Some(file) => project_diff(
                        file,
                        comments,
                        self.selection,
                        self.render_file.then_some(renderer),
                        comment_markdown,
                    ),
                    None => ViewDiffFile {
                        path: self.selected_path.clone(),
                        ..ViewDiffFile::default()
                    },
                };
                (ViewContent::Diff(view), self.selected_path.clone())
            }
        };

        let prompt_html = if self.prompt.trim().is_empty() {
            String::new()
        } else {
            markdown.render(&self.prompt)
        };

        ReviewView {
            tree: self.tree.flatten(&self.selected_path),
            selected_path: self.selected_path.clone(),
            selected_label,
            prompt: self.prompt.clone(),
            prompt_html,
            content,
            selection: (self.selection.start, self.selection.end),
            error: self.error.as_ref().map(ToString::to_string),
            render_file: self.render_file,
            render_comments: self.render_comments,
            comment_count: self.comments.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unified_diff;
    use pretty_assertions::assert_eq;

    const DIFF: &str = "diff --git a/hello.txt b/hello.txt\n\
--- a/hello.txt\n\
+++ b/hello.txt\n\
@@ -1,3 +1,4 @@\n\
 line1\n\
-line2\n\
+line2-new\n\
 line3\n\
+line4\n\
diff --git a/src/other.rs b/src/other.rs\n\
--- a/src/other.rs\n\
+++ b/src/other.rs\n\
@@ -10,2 +10,1 @@\n\
-gone\n\
 kept\n";

    fn file_session() -> ReviewSession {
        ReviewSession::from_files(vec![
            SourceFile::from_text("a.go", "one\ntwo\nthree\nfour\nfive\nsix\nseven"),
            SourceFile::from_text("docs/README.md", "# Title\n\nbody"),
        ])
        .unwrap()
    }

    fn diff_session() -> ReviewSession {
        ReviewSession::from_diff(parse_unified_diff(DIFF).unwrap()).unwrap()
    }

    fn click(line: i64) -> ReviewAction {
        ReviewAction::SelectLine {
            line,
            extend: false,
        }
    }

    fn shift_click(line: i64) -> ReviewAction {
        ReviewAction::SelectLine { line, extend: true }
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        assert_eq!(
            ReviewSession::from_files(Vec::new()).unwrap_err(),
            SessionError::NoFiles
        );
        assert_eq!(
            ReviewSession::from_diff(Vec::new()).unwrap_err(),
            SessionError::EmptyDiff
        );
    }

    #[test]
    fn test_first_file_is_selected() {
        assert_eq!(file_session().selected_path(), "a.go");
        assert_eq!(diff_session().selected_path(), "hello.txt");
    }

    #[test]
    fn test_shift_click_swaps() {
        let mut session = file_session();
        session.handle_action(click(5));
        let events = session.handle_action(shift_click(2));

        assert_eq!(session.selection(), Selection { start: 2, end: 5 });
        assert_eq!(
            events,
            vec![ReviewEvent::SelectionChanged {
                path: "a.go".to_string(),
                start: 2,
                end: 5,
            }]
        );
    }

    #[test]
    fn test_shift_click_from_empty_is_plain_click() {
        let mut session = file_session();
        session.handle_action(shift_click(4));
        assert_eq!(session.selection(), Selection { start: 4, end: 4 });
    }

    #[test]
    fn test_non_positive_lines_are_ignored() {
        let mut session = file_session();
        session.handle_action(click(3));
        assert!(session.handle_action(click(0)).is_empty());
        assert!(session.handle_action(click(-4)).is_empty());
        assert_eq!(session.selection(), Selection { start: 3, end: 3 });
    }

    #[test]
    fn test_comment_without_selection_fails() {
        let mut session = file_session();
        let events = session.handle_action(ReviewAction::AddComment("looks off".to_string()));

        assert_eq!(
            events,
            vec![ReviewEvent::ValidationFailed(ValidationError::EmptySelection)]
        );
        assert!(session.comments().is_empty());
        assert_eq!(session.error(), Some(&ValidationError::EmptySelection));
    }

    #[test]
    fn test_blank_comment_fails_and_keeps_selection() {
        let mut session = file_session();
        session.handle_action(click(2));
        let events = session.handle_action(ReviewAction::AddComment("   \n".to_string()));

        assert_eq!(
            events,
            vec![ReviewEvent::ValidationFailed(ValidationError::EmptyComment)]
        );
        assert_eq!(session.selection(), Selection { start: 2, end: 2 });
        assert!(session.comments().is_empty());
    }

    #[test]
    fn test_add_comment_trims_and_resets() {
        let mut session = file_session();
        session.handle_action(click(2));
        session.handle_action(shift_click(4));
        let events = session.handle_action(ReviewAction::AddComment("  rename this  ".to_string()));

        let expected = Comment::new("a.go", 2, 4, "rename this");
        assert_eq!(events, vec![ReviewEvent::CommentAdded(expected.clone())]);
        assert_eq!(session.comments(), &[expected]);
        assert!(session.selection().is_empty());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_cancel_clears_selection_and_error() {
        let mut session = file_session();
        session.handle_action(ReviewAction::AddComment("x".to_string()));
        session.handle_action(click(1));
        session.handle_action(ReviewAction::CancelComment);

        assert!(session.selection().is_empty());
        assert_eq!(session.error(), None);
        assert!(session.comments().is_empty());
    }

    #[test]
    fn test_select_file() {
        let mut session = file_session();
        session.handle_action(click(1));

        let events = session.handle_action(ReviewAction::SelectFile("docs/README.md".to_string()));
        assert_eq!(
            events,
            vec![ReviewEvent::FileSelected {
                path: "docs/README.md".to_string()
            }]
        );
        assert!(session.selection().is_empty());

        let events = session.handle_action(ReviewAction::SelectFile("nope.rs".to_string()));
        assert_eq!(
            events,
            vec![ReviewEvent::ValidationFailed(ValidationError::UnknownPath(
                "nope.rs".to_string()
            ))]
        );
        assert_eq!(session.selected_path(), "docs/README.md");
    }

    #[test]
    fn test_diff_deleted_line_is_not_selectable() {
        let mut session = diff_session();
        session.handle_action(click(3));

        // new-side 5 is past the end of the hunk
        assert!(session.handle_action(click(5)).is_empty());
        assert!(session.handle_action(shift_click(5)).is_empty());
        assert_eq!(session.selection(), Selection { start: 3, end: 3 });

        session.handle_action(shift_click(1));
        assert_eq!(session.selection(), Selection { start: 1, end: 3 });
    }

    #[test]
    fn test_diff_selection_is_per_selected_file() {
        let mut session = diff_session();
        session.handle_action(ReviewAction::SelectFile("src/other.rs".to_string()));
        assert!(session.handle_action(click(1)).is_empty());
        assert_eq!(session.handle_action(click(10)).len(), 1);
    }

    #[test]
    fn test_markdown_toggle_is_per_path_and_persists() {
        let mut session = file_session();
        session.handle_action(ReviewAction::SelectFile("docs/README.md".to_string()));
        assert!(session.markdown_rendered("docs/README.md"));

        session.handle_action(ReviewAction::ToggleFileRender);
        assert!(!session.markdown_rendered("docs/README.md"));

        session.handle_action(ReviewAction::SelectFile("a.go".to_string()));
        session.handle_action(ReviewAction::SelectFile("docs/README.md".to_string()));
        assert!(!session.markdown_rendered("docs/README.md"));

        let view = session.view(&mut PlainText, &PlainText);
        match view.content {
            ViewContent::File(file) => {
                assert!(file.markdown_file);
                assert!(!file.markdown_rendered);
                assert_eq!(file.lines.len(), 3);
            }
            ViewContent::Diff(_) => panic!("expected file view"),
        }
    }

    #[test]
    fn test_toggle_file_render_on_code() {
        let mut session = file_session();
        session.handle_action(ReviewAction::ToggleFileRender);
        let view = session.view(&mut PlainText, &PlainText);
        assert!(!view.render_file);
        match view.content {
            ViewContent::File(file) => assert!(file.lines.iter().all(|l| l.html.is_empty())),
            ViewContent::Diff(_) => panic!("expected file view"),
        }
    }

    #[test]
    fn test_rendered_markdown_view() {
        let mut session = file_session();
        session.handle_action(ReviewAction::SelectFile("docs/README.md".to_string()));
        let view = session.view(&mut PlainText, &PlainText);
        match view.content {
            ViewContent::File(file) => {
                assert!(file.markdown_rendered);
                assert!(file.lines.is_empty());
                assert_eq!(file.markdown_html, "# Title\n\nbody");
            }
            ViewContent::Diff(_) => panic!("expected file view"),
        }
    }

    #[test]
    fn test_view_label_and_ranges() {
        let mut ranges = RangeMap::new();
        ranges.insert(
            "a.go".to_string(),
            vec![LineRange::new(5, 6), LineRange::new(1, 2)],
        );
        let session = file_session().with_ranges(ranges).with_prompt("Check **errors**");
        let view = session.view(&mut PlainText, &PlainText);

        assert_eq!(view.selected_label, "a.go (lines 1-2, 5-6)");
        assert_eq!(view.prompt, "Check **errors**");
        match view.content {
            ViewContent::File(file) => {
                let numbers: Vec<u32> = file.lines.iter().map(|l| l.number).collect();
                assert_eq!(numbers, vec![1, 2, 5, 6]);
            }
            ViewContent::Diff(_) => panic!("expected file view"),
        }
    }

    #[test]
    fn test_view_tree_and_error() {
        let mut session = file_session();
        session.handle_action(ReviewAction::AddComment(String::new()));
        let view = session.view(&mut PlainText, &PlainText);

        assert_eq!(view.error.as_deref(), Some("comment text is required"));
        let names: Vec<&str> = view.tree.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "README.md", "a.go"]);
        assert!(view.tree[2].selected);
    }

    #[test]
    fn test_comment_render_toggle() {
        struct Upper;
        impl MarkdownRenderer for Upper {
            fn render(&self, source: &str) -> String {
                source.to_uppercase()
            }
        }

        let mut session = diff_session();
        session.handle_action(click(2));
        session.handle_action(ReviewAction::AddComment("why".to_string()));

        let comment_html = |session: &ReviewSession| match session
            .view(&mut PlainText, &Upper)
            .content
        {
            ViewContent::Diff(diff) => diff.hunks[0].lines[2].comments[0].rendered.clone(),
            ViewContent::File(_) => panic!("expected diff view"),
        };

        assert_eq!(comment_html(&session), "WHY");
        session.handle_action(ReviewAction::ToggleCommentRender);
        assert_eq!(comment_html(&session), "why");
    }

    #[test]
    fn test_finish() {
        let mut session = diff_session();
        session.handle_action(click(4));
        session.handle_action(ReviewAction::AddComment("new line".to_string()));

        let events = session.handle_action(ReviewAction::Finish);
        assert_eq!(
            events,
            vec![ReviewEvent::Finished(vec![Comment::new(
                "hello.txt",
                4,
                4,
                "new line"
            )])]
        );
        assert!(session.is_finished());
        assert!(session.handle_action(click(1)).is_empty());
        assert_eq!(session.comments().len(), 1);
    }
}
