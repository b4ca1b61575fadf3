//! In-memory view state store backed by DashMap.

use dashmap::DashMap;

use super::StateStore;
use crate::error::StateError;

/// A view state store backed by a concurrent hash map.
///
/// Fast and thread-safe, but data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StateError> {
        self.store.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StateError> {
        Ok(self
            .store
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect())
    }
}
