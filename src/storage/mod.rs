//! Tiered Document Storage
//!
//! The node side of the system ("pantry"). A node keeps a mapping from tier
//! level to a storage backend and serves documents addressed by
//! `(key, level)` over HTTP.
//!
//! ## Core Concepts
//! - **Backends**: anything implementing `StorageBackend` (get / set / unset on raw bytes).
//!   `MemoryStore` lives in process memory, `FileStore` keeps one file per key under a root directory.
//! - **Tiers**: `TierMapping` binds each level once. Level `"0"` is always memory,
//!   every other level is a directory given at bind time.
//! - **Protocol**: endpoint paths shared with the router, which forwards to them.

pub mod backend;
pub mod disk;
pub mod handlers;
pub mod mapping;
pub mod memory;
pub mod protocol;

pub use backend::{StorageBackend, StorageError};
pub use disk::FileStore;
pub use mapping::{MEMORY_LEVEL, TierMapping};
pub use memory::MemoryStore;

#[cfg(test)]
mod tests;
