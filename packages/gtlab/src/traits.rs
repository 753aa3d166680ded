//! Capability traits used across storage and wrappers.

use crate::core::{EdgeId, NodeId, Weight};
use std::{fmt::Debug, hash::Hash};

/// Minimal read-only graph trait for storage and wrappers.
///
/// Every stored edge is an arc `from -> to`. Undirected graphs keep one arc
/// per direction, so `successors` is the full neighbour list there.
pub trait GraphBase {
    type Key: Debug + Clone + Eq + Hash;
    type Weight: Weight;

    /// Number of nodes.
    fn order(&self) -> usize;
    /// Number of stored arcs.
    fn size(&self) -> usize;

    fn node_id(&self, key: &Self::Key) -> Option<NodeId>;
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;
    fn node_key(&self, id: NodeId) -> &Self::Key;

    fn edge_ids(&self) -> Box<dyn Iterator<Item = EdgeId> + '_>;
    fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId);
    fn edges_between(&self, from: NodeId, to: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_>;
    /// Arcs leaving `v`, in insertion order.
    fn out_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_>;

    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;
    fn predecessors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Successors followed by predecessors; may repeat nodes.
    fn neighborhood(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.successors(v).chain(self.predecessors(v)))
    }

    fn out_degree(&self, v: NodeId) -> usize {
        self.out_edges(v).count()
    }
}

/// Weight lookup for stored arcs.
pub trait EdgeWeights: GraphBase {
    fn weight_of(&self, e: EdgeId) -> Self::Weight;
}

/// Marker for storage representations. Storage types must also implement
/// GraphBase and EdgeWeights.
pub trait StorageRepresentation: GraphBase + EdgeWeights {
    fn with_node_capacity(capacity: usize) -> Self;
}

/// Storage that can grow by nodes and arcs.
pub trait MutableStorage: StorageRepresentation {
    fn add_node(&mut self, key: Self::Key) -> NodeId;
    fn add_arc(&mut self, from: NodeId, to: NodeId, weight: Self::Weight) -> EdgeId;
    fn add_arc_by_key(
        &mut self,
        from_key: Self::Key,
        to_key: Self::Key,
        weight: Self::Weight,
    ) -> EdgeId {
        let from = self.add_node(from_key);
        let to = self.add_node(to_key);
        self.add_arc(from, to, weight)
    }
    fn clear_arcs(&mut self);
}

/// Conversion between storage representations (expensive, may allocate).
pub trait StorageConvert<Target> {
    fn convert(&self) -> Target;
}
