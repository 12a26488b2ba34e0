use super::KeyValueStore;
use crate::error::{AuraError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store: each key becomes `<key>.json` under the root dir.
/// The root is created lazily on first write so a read-only session never
/// touches the disk.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        // Keys are fixed namespace names; anything path-like is a bug in
        // the caller, not user input.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(AuraError::Store(format!("Invalid store key: {}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AuraError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(AuraError::Io)?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_root()?;
        let path = self.key_path(key)?;
        fs::write(path, value).map_err(AuraError::Io)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(AuraError::Io)?;
        }
        Ok(())
    }
}
