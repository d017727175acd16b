//! HTML syntax highlighter using syntect.

use crate::traits::LineRenderer;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Theme used when none is configured or the configured one is unknown.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Highlights whole files into per-line HTML.
///
/// Lines are highlighted in order with one parser state per file, so
/// constructs spanning lines (block comments, strings) stay correct.
pub struct SyntaxHighlighter {
    /// Syntax definitions.
    syntax_set: SyntaxSet,
    /// Current theme.
    theme: Theme,
    /// Rendered files keyed by hash of (path, lines).
    cache: HashMap<u64, Vec<String>>,
    /// Maximum number of cached files.
    max_cache_size: usize,
    /// Syntax index by file extension.
    syntax_cache: HashMap<String, usize>,
}

impl std::fmt::Debug for SyntaxHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxHighlighter")
            .field("cache_size", &self.cache.len())
            .field("max_cache_size", &self.max_cache_size)
            .finish()
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Create a highlighter with the default theme.
    pub fn new() -> Self {
        Self::with_theme_name(DEFAULT_THEME)
    }

    /// Create a highlighter with a named syntect theme.
    ///
    /// Unknown names fall back to [`DEFAULT_THEME`].
    pub fn with_theme_name(theme_name: &str) -> Self {
        let theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.get(theme_name) {
            Some(theme) => theme.clone(),
            None => {
                log::warn!("Unknown theme '{}', using {}", theme_name, DEFAULT_THEME);
                theme_set
                    .themes
                    .get(DEFAULT_THEME)
                    .cloned()
                    .unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme,
            cache: HashMap::new(),
            max_cache_size: 64,
            syntax_cache: HashMap::new(),
        }
    }

    fn syntax_for(&mut self, path: &str) -> &SyntaxReference {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let idx = match self.syntax_cache.get(&ext) {
            Some(&idx) => idx,
            None => {
                let syntax = self
                    .syntax_set
                    .find_syntax_by_extension(&ext)
                    .or_else(|| self.syntax_set.find_syntax_for_file(path).ok().flatten())
                    .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
                let idx = self
                    .syntax_set
                    .syntaxes()
                    .iter()
                    .position(|s| s.name == syntax.name)
                    .unwrap_or(0);
                self.syntax_cache.insert(ext, idx);
                idx
            }
        };

        self.syntax_set
            .syntaxes()
            .get(idx)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn highlight(&mut self, path: &str, lines: &[String]) -> Vec<String> {
        let syntax = self.syntax_for(path).clone();
        let mut highlighter = HighlightLines::new(&syntax, &self.theme);

        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let html = highlighter
                .highlight_line(line, &self.syntax_set)
                .ok()
                .and_then(|regions| {
                    styled_line_to_highlighted_html(&regions, IncludeBackground::No).ok()
                });
            match html {
                Some(html) => out.push(html),
                None => {
                    log::debug!("Highlighting failed for {}, using plain text", path);
                    out.push(htmlescape::encode_minimal(line));
                }
            }
        }
        out
    }

    fn cache_key(path: &str, lines: &[String]) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        path.hash(&mut hasher);
        lines.hash(&mut hasher);
        hasher.finish()
    }
}

impl LineRenderer for SyntaxHighlighter {
    fn render_lines(&mut self, path: &str, lines: &[String]) -> Vec<String> {
        let key = Self::cache_key(path, lines);
        if let Some(rendered) = self.cache.get(&key) {
            return rendered.clone();
        }

        let rendered = self.highlight(path, lines);

        if self.cache.len() >= self.max_cache_size {
            let to_remove = (self.max_cache_size / 5).max(1);
            let keys: Vec<_> = self.cache.keys().take(to_remove).copied().collect();
            for key in keys {
                self.cache.remove(&key);
            }
        }
        self.cache.insert(key, rendered.clone());

        rendered
    }
}
