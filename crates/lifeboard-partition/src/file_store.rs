//! Directory-backed partition store
//!
//! Each partition is a `<key>.json` file inside one directory. Writes go to a
//! temporary file in the same directory which is then renamed over the target,
//! so a reader never sees a half-written partition.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{StoreError, StoreResult};
use crate::store::PartitionStore;

/// File extension used for partition files
pub const PARTITION_EXTENSION: &str = "json";

/// Partition store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create store rooted at `root`; the directory is created on first write
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing a key
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidKey`] if the key could escape the root
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{PARTITION_EXTENSION}")))
    }
}

impl PartitionStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(key, bytes = bytes.len(), "read partition file");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io_error(path, e)),
        }
    }

    fn set(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io_error(&self.root, e))?;

        let mut tmp =
            NamedTempFile::new_in(&self.root).map_err(|e| StoreError::io_error(&self.root, e))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.flush())
            .map_err(|e| StoreError::io_error(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io_error(&path, e.error))?;

        tracing::debug!(key, bytes = bytes.len(), "wrote partition file");
        Ok(())
    }
}

/// Keys are plain file stems: ASCII letters, digits, `_`, `-` and `.`,
/// not starting with a dot.
fn validate_key(key: &str) -> StoreResult<()> {
    let valid_chars = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if key.is_empty() || key.starts_with('.') || !valid_chars {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
