//! Minimal key-value storage interface with a file-per-record backend.
//!
//! One record per key keeps a write failure or corruption on one record from
//! affecting any other. The trait exists so the backend is swappable without
//! touching the routing engine or the rule miner.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreError;

/// Backend-agnostic record store. Values are serialized JSON text.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Write (or overwrite) a record.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read one record. `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// All keys, sorted lexicographically.
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Remove a record. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

/// File-per-record store: one `<key>.json` per record under a root directory.
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        tokio::fs::write(&path, value).await?;
        debug!(key = %key, path = %path.display(), "Record written");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {
                debug!(key = %key, "Record deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
