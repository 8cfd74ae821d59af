//! Document Pantry Library
//!
//! Consistent-hash document routing over a set of tiered storage nodes.
//! The binary (`main.rs`) runs either side of the system from these modules.
//!
//! ## Architecture Modules
//! - **`ring`**: The consistent hash ring. Maps document keys to nodes through
//!   MD5-derived virtual keys and offers an endless walk over the candidates.
//! - **`registry`**: The router's shared state. Owns the ring and the set of
//!   authorized API keys behind a single lock.
//! - **`router`**: The front door ("counter"). Authorizes, resolves the owner
//!   and forwards store / fetch / delete to it over HTTP, relaying the reply.
//! - **`storage`**: The node side ("pantry"). Binds tier levels to memory or
//!   disk backends and serves documents by `(key, level)`.
//! - **`config`**: Command-line and environment options for both processes.
//! - **`shopper`**: A tiny client for issuing requests by hand.

pub mod config;
pub mod registry;
pub mod ring;
pub mod router;
pub mod shopper;
pub mod storage;
