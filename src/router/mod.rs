//! Document Router ("counter")
//!
//! The front door of the system. Every document request is authorized
//! against the registry, mapped to its owning node through the ring and
//! forwarded once to that node's storage endpoint. Whatever the node answers
//! is relayed to the client unchanged.
//!
//! ## Submodules
//! - **`forwarder`**: the `Forwarder` seam and its reqwest implementation.
//! - **`service`**: `DocumentRouter`, the store / fetch / delete operations.
//! - **`handlers`**: Axum handlers for admin and document endpoints.
//! - **`types`**: node addresses, forwarded requests and responses, errors.

pub mod forwarder;
pub mod handlers;
pub mod service;
pub mod types;
