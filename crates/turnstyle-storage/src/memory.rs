//! In-memory storage (no persistence).
//!
//! Used as the default when the host provides no storage, and in tests.
//! Clones share the same underlying map, so a clone handed to a content script
//! and a clone kept by the caller observe the same entries.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::area::{Items, StorageArea};
use crate::error::StorageError;

/// Shared in-memory key/value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    map: Arc<Mutex<Items>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `items`.
    #[must_use]
    pub fn with_items(items: Items) -> Self {
        Self {
            map: Arc::new(Mutex::new(items)),
        }
    }

    /// A copy of everything currently stored.
    #[must_use]
    pub fn items(&self) -> Items {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Items> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageArea for InMemoryStorage {
    async fn get_all(&self) -> Result<Items, StorageError> {
        Ok(self.items())
    }

    async fn get(&self, keys: &[&str]) -> Result<Items, StorageError> {
        let map = self.lock();
        Ok(keys
            .iter()
            .filter_map(|&k| map.get(k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Items) -> Result<(), StorageError> {
        self.lock().extend(items);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _ = self.lock().remove(key);
        Ok(())
    }
}
