use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// Load a JSON value from the store. Returns `None` if the key is absent.
pub async fn load_state<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Load a JSON value, falling back to `T::default()` when the key is absent.
pub async fn load_state_or_default<T, S>(store: &S, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    Ok(load_state(store, key).await?.unwrap_or_default())
}

/// Save a JSON value to the store, replacing whatever was there.
pub async fn save_state<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let body = serde_json::to_string(value)?;
    store.set(key, body).await
}
