use std::{collections::HashMap, sync::Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::CoreError;

/// Key under which the transaction collection is persisted.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Key under which the budget collection is persisted.
pub const BUDGETS_KEY: &str = "budgets";

/// Durable string-keyed store backing each entity collection.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Serializes `items` as one ordered JSON array and writes it under `key`.
pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), CoreError> {
    let json = serde_json::to_string(items)?;
    store.set(key, &json)
}

/// Reads the snapshot stored under `key`; a missing key is an empty collection.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, CoreError> {
    match store.get(key)? {
        Some(data) if !data.trim().is_empty() => Ok(serde_json::from_str(&data)?),
        _ => Ok(Vec::new()),
    }
}

/// In-process store, handy for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_as_empty_collection() {
        let store = MemoryStore::new();
        let items: Vec<u32> = load_collection(&store, "absent").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn collection_is_stored_as_json_array() {
        let store = MemoryStore::new();
        save_collection(&store, "numbers", &[3, 1, 2]).unwrap();
        assert_eq!(store.raw("numbers").as_deref(), Some("[3,1,2]"));
        let loaded: Vec<u32> = load_collection(&store, "numbers").unwrap();
        assert_eq!(loaded, vec![3, 1, 2]);
    }

    #[test]
    fn corrupt_snapshot_surfaces_serde_error() {
        let store = MemoryStore::with_entry("numbers", "{not json");
        let err = load_collection::<u32>(&store, "numbers").unwrap_err();
        assert!(matches!(err, CoreError::Serde(_)), "unexpected error: {err:?}");
    }
}
