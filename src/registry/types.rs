use crate::ring::RingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("key {0} is already registered")]
    ApiKeyExists(String),

    #[error("api key {0} not found")]
    ApiKeyNotFound(String),

    #[error("unauthorized api key")]
    Unauthorized,

    #[error("the ring is not initialized")]
    RingNotInitialized,

    /// The ring exists but has no members left.
    #[error("service is not operative: the ring is empty")]
    Unavailable,

    #[error(transparent)]
    Ring(#[from] RingError),
}

/// Outcome of adding a node through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingChange {
    /// No ring existed; one was created with this node as its only member.
    Created,
    /// The node joined the existing ring.
    Added,
}
