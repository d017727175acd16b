//! Command line arguments and their merge with the config file.

use clap::{CommandFactory, Parser};
use review_config::{AppConfig, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "line-review",
    version,
    about = "Local PR-style review UI for files or a unified diff.",
    after_help = r#"Examples:
  line-review src/main.rs src/lib.rs
  line-review --range src/main.rs:10-40 src/main.rs
  git diff | line-review --prompt "Focus on error handling"
  line-review --diff changes.patch

On finish the comments are printed to stdout."#
)]
pub struct Cli {
    /// Files to review.
    pub paths: Vec<PathBuf>,

    /// Host to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, 0 picks a free port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Instructions shown above the review (markdown).
    #[arg(long)]
    pub prompt: Option<String>,

    /// Review a unified diff file instead of plain files.
    #[arg(long, value_name = "FILE")]
    pub diff: Option<PathBuf>,

    /// Only show these lines of a file, as path:start-end. Repeatable.
    #[arg(long = "range", value_name = "PATH:START-END")]
    pub ranges: Vec<String>,

    /// Print the agent skill markdown and exit.
    #[arg(long)]
    pub skill: bool,

    /// Do not open a browser; just print the URL.
    #[arg(long)]
    pub no_browser: bool,
}

/// Help text, printed to stderr when there is nothing to review.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Settings for one run, after applying CLI overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub theme: String,
    pub render_code: bool,
    pub render_comments: bool,
    pub output_format: OutputFormat,
    pub prompt: String,
}

impl RunOptions {
    /// CLI flags win over config values.
    pub fn resolve(cli: &Cli, config: AppConfig) -> Self {
        Self {
            host: cli.host.clone().unwrap_or(config.host),
            port: cli.port.unwrap_or(config.port),
            open_browser: config.open_browser && !cli.no_browser,
            theme: config.theme,
            render_code: config.render_code,
            render_comments: config.render_comments,
            output_format: config.output_format,
            prompt: cli.prompt.clone().unwrap_or_default(),
        }
    }
}
