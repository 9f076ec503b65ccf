// JSON file backed category table
use atomicwrites::{AtomicFile, OverwriteBehavior};
use itemcat_catalog::{CategorySource, LiveCategory};
use itemcat_core::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Category table stored as a JSON array of `{id, name}`.
///
/// Every [`CategorySource::list`] call re-reads the file; a missing file is an
/// empty table.
#[derive(Debug, Clone)]
pub struct FileCategoryStore {
    path: PathBuf,
}

impl FileCategoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents atomically
    pub fn save(&self, categories: &[LiveCategory]) -> Result<()> {
        let data = serde_json::to_vec_pretty(categories)?;
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&data))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
            })?;
        debug!("Saved {} categories to {:?}", categories.len(), self.path);
        Ok(())
    }
}

impl CategorySource for FileCategoryStore {
    fn list(&self) -> Result<Vec<LiveCategory>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}
