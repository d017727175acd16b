//! Configuration for line-review
//!
//! This crate provides:
//! - Platform directories for log files
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, OutputFormat};
pub use config_file::{load_config_file, CONFIG_FILE};
pub use paths::cache_dir;
