// ⚙️ Configuration - Environment driven (.env supported)
//
//   GRADES_THEME     system | light | dark   (default: system)
//   GRADES_LOG_FILE  path of the rolling log (default: logs/grade-tracker.log)
//   RUST_LOG         tracing filter          (default: info)

use crate::theme::ThemeMode;
use anyhow::{Context as AnyhowContext, Result};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logs/grade-tracker.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub theme: ThemeMode,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: ThemeMode::System,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read settings from the process environment
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup (tests pass a closure over a map)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(theme) = lookup("GRADES_THEME") {
            config.theme = ThemeMode::parse(&theme).context("Invalid GRADES_THEME")?;
        }

        if let Some(path) = lookup("GRADES_LOG_FILE").filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        if let Some(filter) = lookup("RUST_LOG").filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}
