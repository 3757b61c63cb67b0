//! In-memory store

use rustc_hash::FxHashMap;

use super::{CartStore, StoreError, validate_key};

/// Store backed by a map; contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a single pre-seeded entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(key.into(), value.into());

        Self { entries }
    }

    /// Raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;

        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;

        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }
}
