use md5::{Digest, Md5};
use std::collections::BTreeSet;
use thiserror::Error;

/// Number of virtual keys each node gets unless configured otherwise.
pub const DEFAULT_REPLICAS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    #[error("node {0} is already part of the ring")]
    DuplicateNode(String),

    #[error("virtual key {key:032x} of node {node} collides with node {owner}")]
    VirtualKeyCollision {
        node: String,
        owner: String,
        key: u128,
    },

    #[error("node {0} is not part of the ring")]
    NodeNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VirtualNode {
    key: u128,
    node: String,
}

/// Consistent hash ring with a fixed number of virtual keys per node.
///
/// The virtual keys are kept in a single vector sorted by key. Mutations build
/// a new vector and swap it in only once it is complete, so a failed
/// `add_node` leaves the ring exactly as it was.
#[derive(Debug, Clone)]
pub struct HashRing {
    replicas: usize,
    vnodes: Vec<VirtualNode>,
}

impl HashRing {
    /// Creates an empty ring. A replica count of zero is bumped to one.
    pub fn new(replicas: usize) -> Self {
        Self {
            replicas: replicas.max(1),
            vnodes: Vec::new(),
        }
    }

    /// Creates a ring and adds every node in `nodes`, stopping at the first error.
    pub fn with_nodes<I, S>(nodes: I, replicas: usize) -> Result<Self, RingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ring = Self::new(replicas);
        for node in nodes {
            ring.add_node(node.as_ref())?;
        }
        Ok(ring)
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of virtual keys on the ring.
    pub fn len(&self) -> usize {
        self.vnodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.vnodes.iter().any(|vnode| vnode.node == node)
    }

    /// Virtual keys in ascending order.
    pub fn virtual_keys(&self) -> Vec<u128> {
        self.vnodes.iter().map(|vnode| vnode.key).collect()
    }

    /// Distinct member nodes, sorted by name.
    pub fn members(&self) -> Vec<String> {
        self.vnodes
            .iter()
            .map(|vnode| vnode.node.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Places `replicas` virtual keys for `node` on the ring.
    ///
    /// Fails without touching the ring if the node is already a member or if
    /// any of its virtual keys is already taken.
    pub fn add_node(&mut self, node: &str) -> Result<(), RingError> {
        if self.contains(node) {
            return Err(RingError::DuplicateNode(node.to_string()));
        }

        let mut rebuilt = self.vnodes.clone();
        for i in 0..self.replicas {
            let key = hash_key(format!("{}:{}", node, i));
            match rebuilt.binary_search_by(|vnode| vnode.key.cmp(&key)) {
                Ok(idx) => {
                    return Err(RingError::VirtualKeyCollision {
                        node: node.to_string(),
                        owner: rebuilt[idx].node.clone(),
                        key,
                    });
                }
                Err(idx) => rebuilt.insert(
                    idx,
                    VirtualNode {
                        key,
                        node: node.to_string(),
                    },
                ),
            }
        }

        self.vnodes = rebuilt;
        Ok(())
    }

    /// Removes every virtual key owned by `node`.
    pub fn remove_node(&mut self, node: &str) -> Result<(), RingError> {
        if !self.contains(node) {
            return Err(RingError::NodeNotFound(node.to_string()));
        }

        self.vnodes = self
            .vnodes
            .iter()
            .filter(|vnode| vnode.node != node)
            .cloned()
            .collect();
        Ok(())
    }

    pub fn remove_all(&mut self) {
        self.vnodes = Vec::new();
    }

    /// Returns the node owning `key`, or `None` if the ring is empty.
    pub fn get_node(&self, key: &str) -> Option<&str> {
        self.get_node_pos(key).map(|(node, _)| node)
    }

    /// Returns the owning node together with the index of its virtual key.
    pub fn get_node_pos(&self, key: &str) -> Option<(&str, usize)> {
        if self.vnodes.is_empty() {
            return None;
        }

        let hash = hash_key(key);
        let mut pos = self.vnodes.partition_point(|vnode| vnode.key < hash);
        if pos == self.vnodes.len() {
            pos = 0;
        }
        Some((self.vnodes[pos].node.as_str(), pos))
    }

    /// Endless walk over the ring starting at the owner of `key`.
    ///
    /// Yields nothing when the ring is empty. Calling it again restarts the
    /// walk from the owner.
    pub fn get_nodes(&self, key: &str) -> NodeCursor<'_> {
        let pos = self.get_node_pos(key).map_or(0, |(_, pos)| pos);
        NodeCursor {
            vnodes: &self.vnodes,
            pos,
        }
    }
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new(DEFAULT_REPLICAS)
    }
}

/// Cyclic iterator over the ring's virtual keys, yielding their owners.
#[derive(Debug, Clone)]
pub struct NodeCursor<'a> {
    vnodes: &'a [VirtualNode],
    pos: usize,
}

impl NodeCursor<'_> {
    /// Index of the virtual key the next call to `next` will yield.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for NodeCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let vnode = self.vnodes.get(self.pos)?;
        self.pos = (self.pos + 1) % self.vnodes.len();
        Some(vnode.node.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.vnodes.is_empty() {
            (0, Some(0))
        } else {
            (usize::MAX, None)
        }
    }
}

/// Position of `input` on the ring: its MD5 digest as a big-endian integer.
pub fn hash_key(input: impl AsRef<[u8]>) -> u128 {
    let digest = Md5::digest(input.as_ref());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    u128::from_be_bytes(bytes)
}
