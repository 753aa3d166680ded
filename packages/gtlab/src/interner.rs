//! Insertion-ordered node interner.

use crate::core::NodeId;
use indexmap::IndexSet;
use std::hash::Hash;

/// Keys are stored once; the position of a key in the set is its `NodeId`.
#[derive(Clone, Debug)]
pub struct NodeInterner<K>
where
    K: Eq + Hash + Clone,
{
    keys: IndexSet<K>,
}

impl<K> Default for NodeInterner<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NodeInterner<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            keys: IndexSet::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: IndexSet::with_capacity(capacity),
        }
    }

    /// Intern key. If the key already exists its NodeId is returned unchanged.
    pub fn intern(&mut self, key: K) -> NodeId {
        let (index, _) = self.keys.insert_full(key);
        NodeId(index)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key(&self, id: NodeId) -> &K {
        &self.keys[id.0]
    }

    pub fn get_id(&self, key: &K) -> Option<NodeId> {
        self.keys.get_index_of(key).map(NodeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &K)> {
        self.keys.iter().enumerate().map(|(i, k)| (NodeId(i), k))
    }
}
