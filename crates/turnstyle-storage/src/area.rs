//! The storage service interface.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::StorageError;

/// A set of stored entries, key to JSON value.
pub type Items = BTreeMap<String, Value>;

/// Asynchronous key/value storage area (the extension's synced storage).
///
/// Implementations are free to be eventually consistent across devices; the
/// only guarantee turnStyle relies on is that a completed `set` or `remove`
/// is visible to the next `get` from the same page context.
#[allow(async_fn_in_trait)]
pub trait StorageArea {
    /// Every entry in the store.
    async fn get_all(&self) -> Result<Items, StorageError>;

    /// The entries for `keys` that exist. Missing keys are simply absent.
    async fn get(&self, keys: &[&str]) -> Result<Items, StorageError>;

    /// Write every entry in `items`, overwriting existing values.
    async fn set(&self, items: Items) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Await a storage call, giving up after `limit`.
///
/// # Errors
///
/// Returns [`StorageError::Timeout`] if the call does not finish in time, or
/// whatever error the call itself returned.
pub async fn timed<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, StorageError>>,
) -> Result<T, StorageError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StorageError::Timeout(limit))?
}
