//! Load/save of JSON-encoded sequences under a single store key.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store::{KeyValueStore, StoreError};

/// Read the sequence stored under `key`. A missing key or content that does
/// not decode falls back to `default`.
pub fn load<T, S>(store: &S, key: &str, default: Vec<T>) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match decode(store, key) {
        Some(items) => items,
        None => default,
    }
}

/// Like [`load`], but tells the caller whether the stored value was usable.
pub fn decode<T, S>(store: &S, key: &str) -> Option<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::debug!(key, error = %e, "stored value is malformed, using default");
            None
        }
    }
}

/// Serialize and write the whole sequence under `key`.
pub fn save<T, S>(store: &mut S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(items)?;
    store.set(key, &encoded)
}

/// Drop the stored sequence entirely.
pub fn remove<S>(store: &mut S, key: &str) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(key)
}

/// Load the sequence and write it straight back, so a view that falls back
/// to its defaults leaves them persisted.
pub fn mount<T, S>(store: &mut S, key: &str, default: Vec<T>) -> Result<Vec<T>, StoreError>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let items = load(store, key, default);
    save(store, key, &items)?;
    Ok(items)
}
