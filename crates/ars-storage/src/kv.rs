use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::BoxFuture;

/// String-keyed store of opaque serialized values.
///
/// Session state, answer accumulators and the awaiting-continue flag all
/// live here, under the keys built by `ars_core::cache_keys`.
pub trait KeyValueStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>>;

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Deleting a missing key is not an error.
    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;
}

/// Process-local [`KeyValueStore`]. Entries never expire.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move { Ok(self.entries.read().await.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.entries.write().await.insert(key.to_string(), value);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.entries.write().await.remove(key);
            Ok(())
        })
    }
}
