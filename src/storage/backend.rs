use bytes::Bytes;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no document found for key {0}")]
    NotFound(String),

    #[error("invalid document key {0:?}")]
    InvalidKey(String),

    #[error("level {0} is already mapped")]
    AlreadyMapped(String),

    #[error("no route found for level {0}")]
    LevelNotMapped(String),

    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value contract every tier backend fulfils.
///
/// Values are raw bytes and come back exactly as they were stored. The
/// `Display` output is what `/store_mapping` shows for the tier.
pub trait StorageBackend: fmt::Display + Send + Sync {
    fn get(&self, key: &str) -> Result<Bytes, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Bytes) -> Result<(), StorageError>;

    fn unset(&self, key: &str) -> Result<(), StorageError>;
}
