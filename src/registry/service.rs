use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::types::{RegistryError, RingChange};
use crate::ring::HashRing;

#[derive(Default)]
struct RegistryState {
    ring: Option<HashRing>,
    api_keys: HashSet<String>,
}

pub struct Registry {
    replicas: usize,
    state: RwLock<RegistryState>,
}

impl Registry {
    /// Creates an empty registry. Rings it builds use `replicas` virtual keys per node.
    pub fn new(replicas: usize) -> Arc<Self> {
        Arc::new(Self {
            replicas: replicas.max(1),
            state: RwLock::new(RegistryState::default()),
        })
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub async fn register_api_key(&self, key: &str) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        if !state.api_keys.insert(key.to_string()) {
            return Err(RegistryError::ApiKeyExists(key.to_string()));
        }
        info!("Registered api key ({} total)", state.api_keys.len());
        Ok(())
    }

    pub async fn revoke_api_key(&self, key: &str) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        if !state.api_keys.remove(key) {
            return Err(RegistryError::ApiKeyNotFound(key.to_string()));
        }
        info!("Revoked api key ({} left)", state.api_keys.len());
        Ok(())
    }

    /// Adds `node` to the ring, creating the ring on first use.
    pub async fn add_node(&self, node: &str) -> Result<RingChange, RegistryError> {
        let mut state = self.state.write().await;
        if let Some(ring) = state.ring.as_mut() {
            ring.add_node(node)?;
            info!("Node {} joined the ring ({} virtual keys)", node, ring.len());
            return Ok(RingChange::Added);
        }

        state.ring = Some(HashRing::with_nodes([node], self.replicas)?);
        info!("Ring created with node {}", node);
        Ok(RingChange::Created)
    }

    pub async fn remove_node(&self, node: &str) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        let ring = state
            .ring
            .as_mut()
            .ok_or(RegistryError::RingNotInitialized)?;
        ring.remove_node(node)?;
        info!("Node {} left the ring ({} virtual keys)", node, ring.len());
        Ok(())
    }

    /// Owner and virtual key index the ring assigns to the string `node`.
    pub async fn node_position(&self, node: &str) -> Result<(String, usize), RegistryError> {
        let state = self.state.read().await;
        let ring = state
            .ring
            .as_ref()
            .ok_or(RegistryError::RingNotInitialized)?;
        ring.get_node_pos(node)
            .map(|(owner, pos)| (owner.to_string(), pos))
            .ok_or(RegistryError::Unavailable)
    }

    pub async fn clear_ring(&self) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        let ring = state
            .ring
            .as_mut()
            .ok_or(RegistryError::RingNotInitialized)?;
        ring.remove_all();
        info!("All nodes removed from the ring");
        Ok(())
    }

    pub async fn ring_members(&self) -> Result<Vec<String>, RegistryError> {
        let state = self.state.read().await;
        state
            .ring
            .as_ref()
            .map(HashRing::members)
            .ok_or(RegistryError::RingNotInitialized)
    }

    /// Authorizes `api_key` and returns the node owning `doc_key`.
    ///
    /// The key check runs before the ring is consulted. Both happen under the
    /// same read guard, which is released on return.
    pub async fn resolve(&self, api_key: &str, doc_key: &str) -> Result<String, RegistryError> {
        let state = self.state.read().await;
        if !state.api_keys.contains(api_key) {
            return Err(RegistryError::Unauthorized);
        }

        let ring = state.ring.as_ref().ok_or(RegistryError::Unavailable)?;
        if ring.get_nodes(doc_key).next().is_none() {
            return Err(RegistryError::Unavailable);
        }

        ring.get_node(doc_key)
            .map(str::to_string)
            .ok_or(RegistryError::Unavailable)
    }
}
