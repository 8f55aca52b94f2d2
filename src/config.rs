// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Save after every command that changes the list. When off, tasks are only
    /// written when the session ends.
    #[serde(default = "default_true")]
    pub autosave: bool,

    #[serde(default = "default_true")]
    pub show_help_on_first_run: bool,

    /// When set, one unreadable record makes the whole load fail instead of being skipped.
    #[serde(default)]
    pub strict_load: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File name inside the data directory. Defaults to `duke.txt`.
    #[serde(default)]
    pub task_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Match the serde defaults
            autosave: true,
            show_help_on_first_run: true,
            strict_load: false,
            log_level: default_log_level(),
            task_file: None,
        }
    }
}

impl Config {
    /// Load the configuration using an explicit context.
    /// A missing file yields the defaults; unreadable or malformed files are errors.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        Ok(config)
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// The configured log level; unknown names fall back to `Info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_gives_defaults() {
        let ctx = TestContext::new();
        assert_eq!(Config::load(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let cfg = Config {
            autosave: false,
            strict_load: true,
            log_level: "debug".to_string(),
            task_file: Some("tasks.txt".to_string()),
            ..Config::default()
        };
        cfg.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_serde_defaults() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "autosave = false\n").unwrap();

        let cfg = Config::load(&ctx).unwrap();
        assert!(!cfg.autosave);
        assert!(cfg.show_help_on_first_run);
        assert_eq!(cfg.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "autosave = \"maybe\"\n").unwrap();

        let err = Config::load(&ctx).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let cfg = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.log_level_filter(), LevelFilter::Info);
        let cfg = Config {
            log_level: "warn".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.log_level_filter(), LevelFilter::Warn);
    }
}
