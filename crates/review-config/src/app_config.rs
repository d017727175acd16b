//! Application configuration
//!
//! Configuration loaded from `.line-review.toml`. Every field has a default,
//! so a partial file is fine and a missing file means defaults.

use serde::{Deserialize, Serialize};

/// Encoding of the comments printed on finish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tabular TOON text.
    #[default]
    Toon,
    /// `{"comments": [...]}`.
    Json,
}

/// Application configuration loaded from `.line-review.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the review server binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind, 0 picks any free port
    #[serde(default)]
    pub port: u16,

    /// Open the review page in the default browser on start
    #[serde(default = "default_true")]
    pub open_browser: bool,

    /// Syntect theme used for code highlighting
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Highlight code lines initially
    #[serde(default = "default_true")]
    pub render_code: bool,

    /// Show comment bodies as rendered markdown initially
    #[serde(default = "default_true")]
    pub render_comments: bool,

    /// Format of the comments written to stdout
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_theme() -> String {
    "InspiredGitHub".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 0,
            open_browser: true,
            theme: default_theme(),
            render_code: true,
            render_comments: true,
            output_format: OutputFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::from_toml(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 0);
        assert!(config.open_browser);
        assert_eq!(config.theme, "InspiredGitHub");
        assert!(config.render_code);
        assert!(config.render_comments);
        assert_eq!(config.output_format, OutputFormat::Toon);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            host = "0.0.0.0"
            port = 8080
            open_browser = false
            theme = "Solarized (dark)"
            output_format = "json"
        "#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(!config.open_browser);
        assert_eq!(config.theme, "Solarized (dark)");
        assert_eq!(config.output_format, OutputFormat::Json);
        // Unset fields use defaults
        assert!(config.render_code);
        assert!(config.render_comments);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config = AppConfig::from_toml("render_comments = false").unwrap();
        assert!(!config.render_comments);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(AppConfig::from_toml("port = 70000").is_err());
        assert!(AppConfig::from_toml("output_format = \"yaml\"").is_err());
    }
}
