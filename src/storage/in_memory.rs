//! In-memory implementation of KeyValueStore for testing and development

use crate::core::error::StorageError;
use crate::core::store::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory key-value store
///
/// Useful for testing and for sessions that should not outlive the process.
/// Uses RwLock for thread-safe access; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(e: impl std::fmt::Display) -> StorageError {
        StorageError::Unavailable {
            backend: "memory",
            message: format!("Failed to acquire lock: {}", e),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(Self::poisoned)?;

        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(Self::poisoned)?;

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(Self::poisoned)?;

        values.remove(key);

        Ok(())
    }
}
