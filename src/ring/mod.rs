//! Consistent Hash Ring
//!
//! Maps document keys onto storage nodes. Every node is placed on the ring
//! `replicas` times ("virtual nodes") so that load spreads evenly, and a
//! membership change only moves the keys sitting next to the affected points.
//!
//! ## Core Concepts
//! - **Virtual keys**: `md5("{node}:{i}")` read as a big-endian `u128`.
//! - **Lookup**: a key belongs to the first virtual key `>=` its hash,
//!   wrapping around to the smallest one.
//! - **Candidates**: `NodeCursor` walks the ring from the owner onwards,
//!   forever, for callers that want the next nodes after the primary.

pub mod hashring;

pub use hashring::{DEFAULT_REPLICAS, HashRing, NodeCursor, RingError, hash_key};
