use axum::body::Bytes;
use axum::http::Method;
use md5::{Digest, Md5};
use std::sync::Arc;

use super::forwarder::Forwarder;
use super::types::{ForwardRequest, NodeAddr, NodeResponse, RouterError};
use crate::registry::service::Registry;
use crate::storage::protocol::store_path;

/// Routes document operations to the node that owns them.
///
/// Each operation authorizes the caller, resolves the owner under the
/// registry lock, releases the lock and forwards exactly once. There is no
/// retry and no fallback to the next node on the ring.
pub struct DocumentRouter<F> {
    registry: Arc<Registry>,
    forwarder: F,
}

impl<F: Forwarder> DocumentRouter<F> {
    pub fn new(registry: Arc<Registry>, forwarder: F) -> Arc<Self> {
        Arc::new(Self {
            registry,
            forwarder,
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Stores `payload` under its content hash on the owning node.
    pub async fn store(
        &self,
        api_key: &str,
        level: &str,
        payload: Bytes,
    ) -> Result<NodeResponse, RouterError> {
        let doc_key = content_key(&payload);
        let node = self.registry.resolve(api_key, &doc_key).await?;
        tracing::debug!("PUT {} (level {}) -> {}", doc_key, level, node);
        self.forward(&node, Method::PUT, &doc_key, level, payload)
            .await
    }

    pub async fn fetch(
        &self,
        api_key: &str,
        doc_key: &str,
        level: &str,
    ) -> Result<NodeResponse, RouterError> {
        let node = self.registry.resolve(api_key, doc_key).await?;
        tracing::debug!("GET {} (level {}) -> {}", doc_key, level, node);
        self.forward(&node, Method::GET, doc_key, level, Bytes::new())
            .await
    }

    pub async fn delete(
        &self,
        api_key: &str,
        doc_key: &str,
        level: &str,
    ) -> Result<NodeResponse, RouterError> {
        let node = self.registry.resolve(api_key, doc_key).await?;
        tracing::debug!("DELETE {} (level {}) -> {}", doc_key, level, node);
        self.forward(&node, Method::DELETE, doc_key, level, Bytes::new())
            .await
    }

    async fn forward(
        &self,
        node: &str,
        method: Method,
        doc_key: &str,
        level: &str,
        body: Bytes,
    ) -> Result<NodeResponse, RouterError> {
        let request = ForwardRequest {
            node: node.parse::<NodeAddr>()?,
            method,
            path: store_path(doc_key, level),
            body,
        };
        self.forwarder.forward(request).await
    }
}

/// Document key derived from a payload: lowercase hex MD5.
pub fn content_key(payload: &[u8]) -> String {
    format!("{:x}", Md5::digest(payload))
}
