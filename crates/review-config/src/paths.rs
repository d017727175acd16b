//! Cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/line-review/`
//! - macOS: `~/Library/Caches/line-review/`
//! - Windows: `%LOCALAPPDATA%\line-review\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "line-review";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create cache directory {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_exists() {
        // Headless CI may have no cache directory at all
        if let Ok(dir) = cache_dir() {
            assert!(dir.exists());
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
