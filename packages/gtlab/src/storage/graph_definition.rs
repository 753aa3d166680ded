//! GraphDefinition: mathematical definition (nodes + arcs).
//! Implements GraphBase and StorageRepresentation/MutableStorage so it can act as a storage
//! representation. Loaders build one of these and convert it into the storage they need.

use crate::core::{EdgeId, NodeId, Weight};
use crate::interner::NodeInterner;
use crate::traits::{EdgeWeights, GraphBase, MutableStorage, StorageConvert, StorageRepresentation};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord<W> {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: W,
}

impl<W> EdgeRecord<W> {
    pub fn new(from: NodeId, to: NodeId, weight: W) -> Self {
        EdgeRecord { from, to, weight }
    }
}

#[derive(Clone, Debug)]
pub struct GraphDefinition<K = usize, W = i64>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    pub nodes: NodeInterner<K>,
    pub edges: Vec<EdgeRecord<W>>,
}

impl<K, W> Default for GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W> GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    pub fn new() -> Self {
        Self {
            nodes: NodeInterner::new(),
            edges: Vec::new(),
        }
    }

    /// True when every arc `u -> v` of weight `w` has a twin `v -> u` of the same weight.
    pub fn is_symmetric(&self) -> bool {
        let arcs: HashMap<(NodeId, NodeId), W> = self
            .edges
            .iter()
            .map(|e| ((e.from, e.to), e.weight))
            .collect();
        self.edges
            .iter()
            .all(|e| arcs.get(&(e.to, e.from)) == Some(&e.weight))
    }
}

impl<K, W> StorageRepresentation for GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn with_node_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeInterner::with_capacity(capacity),
            edges: Vec::new(),
        }
    }
}

impl<K, W> MutableStorage for GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn add_node(&mut self, key: K) -> NodeId {
        self.nodes.intern(key)
    }

    fn add_arc(&mut self, from: NodeId, to: NodeId, weight: W) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(EdgeRecord::new(from, to, weight));
        id
    }

    fn clear_arcs(&mut self) {
        self.edges.clear();
    }
}

impl<K, W> GraphBase for GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    type Key = K;
    type Weight = W;

    fn order(&self) -> usize {
        self.nodes.len()
    }
    fn size(&self) -> usize {
        self.edges.len()
    }

    fn node_id(&self, key: &K) -> Option<NodeId> {
        self.nodes.get_id(key)
    }
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new((0..self.nodes.len()).map(NodeId))
    }
    fn node_key(&self, id: NodeId) -> &K {
        self.nodes.key(id)
    }

    fn edge_ids(&self) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new((0..self.edges.len()).map(EdgeId))
    }
    fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId) {
        let r = &self.edges[e.0];
        (r.from, r.to)
    }
    fn edges_between(&self, from: NodeId, to: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new(
            self.edges
                .iter()
                .enumerate()
                .filter(move |(_, e)| e.from == from && e.to == to)
                .map(|(i, _)| EdgeId(i)),
        )
    }
    fn out_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new(
            self.edges
                .iter()
                .enumerate()
                .filter(move |(_, e)| e.from == v)
                .map(|(i, _)| EdgeId(i)),
        )
    }

    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.edges.iter().filter(move |e| e.from == v).map(|e| e.to))
    }
    fn predecessors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.edges.iter().filter(move |e| e.to == v).map(|e| e.from))
    }
}

impl<K, W> EdgeWeights for GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn weight_of(&self, e: EdgeId) -> W {
        self.edges[e.0].weight
    }
}

impl<K, W, Target> StorageConvert<Target> for GraphDefinition<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
    Target: MutableStorage<Key = K, Weight = W>,
{
    fn convert(&self) -> Target {
        let mut target = Target::with_node_capacity(self.nodes.len());
        for (_, key) in self.nodes.iter() {
            target.add_node(key.clone());
        }
        for edge in &self.edges {
            target.add_arc(edge.from, edge.to, edge.weight);
        }
        target
    }
}
