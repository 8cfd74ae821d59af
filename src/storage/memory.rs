use super::backend::{StorageBackend, StorageError};

use bytes::Bytes;
use dashmap::DashMap;
use std::fmt;

/// In-memory tier. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    data: DashMap<String, Bytes>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Result<Bytes, StorageError> {
        self.data
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn set(&self, key: &str, value: Bytes) -> Result<(), StorageError> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<(), StorageError> {
        self.data
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}

impl fmt::Display for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryStore")
    }
}
