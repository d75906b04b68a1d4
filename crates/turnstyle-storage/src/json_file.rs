//! JSON-file storage.
//!
//! `JsonFileStorage` persists the whole key space as one JSON object on disk.
//! Every call reads the file; every mutation rewrites it. The rewrite goes to
//! a sibling temporary file that is then renamed over the original, so a
//! crash mid-write leaves the previous contents intact.
//!
//! A missing file reads as an empty store and is created on first write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::area::{Items, StorageArea};
use crate::error::StorageError;

/// Storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Open (lazily) the store at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Items, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Items::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Items::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, items: &Items) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!("wrote {} entries to {}", items.len(), self.path.display());
        Ok(())
    }
}

impl StorageArea for JsonFileStorage {
    async fn get_all(&self) -> Result<Items, StorageError> {
        self.load().await
    }

    async fn get(&self, keys: &[&str]) -> Result<Items, StorageError> {
        let mut all = self.load().await?;
        Ok(keys
            .iter()
            .filter_map(|&k| all.remove(k).map(|v| (k.to_string(), v)))
            .collect())
    }

    async fn set(&self, items: Items) -> Result<(), StorageError> {
        let mut all = self.load().await?;
        all.extend(items);
        self.store(&all).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut all = self.load().await?;
        if all.remove(key).is_some() {
            self.store(&all).await?;
        }
        Ok(())
    }
}
