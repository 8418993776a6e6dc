use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::error::{Result, StoreError};
use crate::storage::StorageBackend;

/// File-backed storage: one `<key>.json` document per collection under a
/// root directory. Writes go to a temp file first, then rename into place,
/// so a crash mid-write never leaves a torn document.
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Opens (creating if needed) a storage directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Collection keys are plain identifiers; anything path-like is a
        // caller bug, not a file to resolve.
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StoreError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!("{key}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(&value)?;
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        tracing::debug!(key, bytes = bytes.len(), "persisted collection");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
