// Local file storage for task records.
//
// The core only sees `TaskStorage`: an ordered list of record lines in, the same out.
// The record format itself belongs to `model::item`.
use crate::config::Config;
use crate::context::AppContext;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TASK_FILENAME: &str = "duke.txt";

/// Load/save contract between the session and wherever records live.
pub trait TaskStorage {
    /// Whether anything was ever saved. `false` means a first run.
    fn exists(&self) -> bool;

    /// Returns the stored records in order. A missing source is an empty list.
    fn load(&self) -> Result<Vec<String>>;

    fn save(&mut self, records: &[String]) -> Result<()>;
}

/// Records kept one per line in a plain text file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the task file inside the context's data directory,
    /// honouring a `task_file` override from the config.
    pub fn from_context(ctx: &dyn AppContext, config: &Config) -> Result<Self> {
        let path = match &config.task_file {
            Some(name) => ctx.get_data_dir()?.join(name),
            None => ctx
                .get_task_file_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?,
        };
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock on the sidecar lock file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&file)?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

impl TaskStorage for LocalStorage {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            log::info!("No task file at {:?}, starting empty", self.path);
            return Ok(vec![]);
        }
        let content = Self::with_lock(&self.path, || {
            fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read task file {:?}", self.path))
        })?;
        let records: Vec<String> = content.lines().map(str::to_string).collect();
        log::debug!("Read {} record(s) from {:?}", records.len(), self.path);
        Ok(records)
    }

    fn save(&mut self, records: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let mut content = records.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        Self::with_lock(&self.path, || {
            Self::atomic_write(&self.path, &content)
                .with_context(|| format!("Failed to write task file {:?}", self.path))
        })?;
        log::debug!("Wrote {} record(s) to {:?}", records.len(), self.path);
        Ok(())
    }
}

/// In-memory storage, for tests and for running without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Option<Vec<String>>,
    fail_with: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds records from an earlier session.
    pub fn with_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: Some(records.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Makes every following load and save fail with `reason`.
    pub fn failing(mut self, reason: &str) -> Self {
        self.fail_with = Some(reason.to_string());
        self
    }

}

impl TaskStorage for MemoryStorage {
    fn exists(&self) -> bool {
        self.records.is_some()
    }

    fn load(&self) -> Result<Vec<String>> {
        if let Some(reason) = &self.fail_with {
            anyhow::bail!("{}", reason);
        }
        Ok(self.records.clone().unwrap_or_default())
    }

    fn save(&mut self, records: &[String]) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            anyhow::bail!("{}", reason);
        }
        self.records = Some(records.to_vec());
        Ok(())
    }
}
