//! Where duke keeps its files.
//!
//! Everything that reads or writes a file is handed a `&dyn AppContext`, so the binary can point
//! at the platform directories (or a `--root` of the user's choosing) while tests get a throwaway
//! directory of their own.

use crate::storage::DEFAULT_TASK_FILENAME;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const LOG_FILENAME: &str = "duke.log";

pub trait AppContext: std::fmt::Debug {
    /// Holds the task file and the log. Created on first use.
    fn get_data_dir(&self) -> Result<PathBuf>;
    /// Holds `config.toml`. Created on first use.
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILENAME))
    }

    fn get_task_file_path(&self) -> Option<PathBuf> {
        self.get_data_dir()
            .ok()
            .map(|dir| dir.join(DEFAULT_TASK_FILENAME))
    }

    fn get_log_file_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|dir| dir.join(LOG_FILENAME))
    }
}

fn created(dir: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;
    Ok(dir)
}

/// Platform directories, or `<root>/data` and `<root>/config` under an explicit root.
#[derive(Clone, Debug)]
pub struct StandardContext {
    root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn resolve(&self, under_root: &str, platform: fn(&ProjectDirs) -> &Path) -> Result<PathBuf> {
        let dir = match &self.root {
            Some(root) => root.join(under_root),
            None => {
                let dirs = ProjectDirs::from("com", "duke", "duke")
                    .ok_or_else(|| anyhow::anyhow!("No home directory to store tasks in"))?;
                platform(&dirs).to_path_buf()
            }
        };
        created(dir)
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data", ProjectDirs::data_dir)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config", ProjectDirs::config_dir)
    }
}

/// A fresh directory under the system temp dir; deleted again on drop.
#[derive(Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("duke_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root).expect("temp dir for TestContext");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        created(self.root.join("data"))
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        created(self.root.join("config"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
