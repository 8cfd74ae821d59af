//! Membership & Auth Registry
//!
//! Holds the router's shared state: the consistent hash ring (absent until the
//! first node joins) and the set of API keys allowed to touch documents.
//!
//! ## Core Mechanisms
//! - **Single lock**: ring and keys live behind one `RwLock`, so an
//!   authorization check and the ring lookup that follows it see the same state.
//! - **Lazy ring**: the first `add_node` creates the ring; every other ring
//!   operation fails with `RingNotInitialized` until then.
//! - **Resolve**: the hot path for document requests. Authorizes, checks that
//!   the ring has members, and returns the owner. The guard is dropped before
//!   the caller talks to the network.

pub mod service;
pub mod types;
