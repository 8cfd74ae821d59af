use super::backend::{StorageBackend, StorageError};
use super::disk::FileStore;
use super::memory::MemoryStore;

use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Level that is always served from memory.
pub const MEMORY_LEVEL: &str = "0";

/// Level -> backend bindings of a single storage node.
pub struct TierMapping {
    levels: DashMap<String, Arc<dyn StorageBackend>>,
}

impl TierMapping {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Binds `level` to a backend: memory for [`MEMORY_LEVEL`], otherwise a
    /// `FileStore` rooted at `route`.
    ///
    /// A level can only be bound once. Nothing is inserted if the backend
    /// cannot be created.
    pub fn bind(&self, level: &str, route: &str) -> Result<(), StorageError> {
        match self.levels.entry(level.to_string()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyMapped(level.to_string())),
            Entry::Vacant(slot) => {
                let backend: Arc<dyn StorageBackend> = if level == MEMORY_LEVEL {
                    Arc::new(MemoryStore::new())
                } else {
                    Arc::new(FileStore::new(route)?)
                };
                tracing::info!("Level {} mapped to {}", level, backend);
                slot.insert(backend);
                Ok(())
            }
        }
    }

    /// Removes the binding of `level` and hands back its backend.
    pub fn unbind(&self, level: &str) -> Result<Arc<dyn StorageBackend>, StorageError> {
        self.levels
            .remove(level)
            .map(|(_, backend)| backend)
            .ok_or_else(|| StorageError::LevelNotMapped(level.to_string()))
    }

    pub fn backend(&self, level: &str) -> Result<Arc<dyn StorageBackend>, StorageError> {
        self.levels
            .get(level)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::LevelNotMapped(level.to_string()))
    }

    /// `(level, backend description)` pairs sorted by level.
    pub fn describe(&self) -> Vec<(String, String)> {
        let mut bindings: Vec<(String, String)> = self
            .levels
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().to_string()))
            .collect();
        bindings.sort();
        bindings
    }

    pub fn get(&self, level: &str, key: &str) -> Result<Bytes, StorageError> {
        self.backend(level)?.get(key)
    }

    pub fn set(&self, level: &str, key: &str, value: Bytes) -> Result<(), StorageError> {
        self.backend(level)?.set(key, value)
    }

    pub fn unset(&self, level: &str, key: &str) -> Result<(), StorageError> {
        self.backend(level)?.unset(key)
    }
}

impl Default for TierMapping {
    fn default() -> Self {
        Self {
            levels: DashMap::new(),
        }
    }
}
