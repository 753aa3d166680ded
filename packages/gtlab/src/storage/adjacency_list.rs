//! AdjacencyList: arc records plus out- and in-adjacency, so both successors and predecessors
//! are O(deg). Successor order is arc insertion order, which is what the traversal algorithms
//! rely on to reproduce file order.

use crate::core::{EdgeId, NodeId, Weight};
use crate::interner::NodeInterner;
use crate::storage::graph_definition::{EdgeRecord, GraphDefinition};
use crate::traits::{EdgeWeights, GraphBase, MutableStorage, StorageConvert, StorageRepresentation};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct AdjacencyList<K = usize, W = i64>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    pub nodes: NodeInterner<K>,
    pub edges: Vec<EdgeRecord<W>>,
    pub out_adj: Vec<Vec<EdgeId>>,
    pub in_adj: Vec<Vec<EdgeId>>,
}

impl<K, W> Default for AdjacencyList<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W> AdjacencyList<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    pub fn new() -> Self {
        Self {
            nodes: NodeInterner::new(),
            edges: Vec::new(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn from_graphdef(def: GraphDefinition<K, W>) -> Self {
        let n = def.nodes.len();
        let mut al = Self {
            nodes: def.nodes,
            edges: Vec::with_capacity(def.edges.len()),
            out_adj: vec![Vec::new(); n],
            in_adj: vec![Vec::new(); n],
        };
        for er in def.edges {
            al.add_arc(er.from, er.to, er.weight);
        }
        al
    }

    pub fn to_graph_def(&self) -> GraphDefinition<K, W> {
        GraphDefinition {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    fn ensure_slot(&mut self, v: NodeId) {
        if self.out_adj.len() <= v.0 {
            self.out_adj.resize(v.0 + 1, Vec::new());
            self.in_adj.resize(v.0 + 1, Vec::new());
        }
    }
}

impl<K, W> From<GraphDefinition<K, W>> for AdjacencyList<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn from(def: GraphDefinition<K, W>) -> Self {
        Self::from_graphdef(def)
    }
}

impl<K, W> StorageRepresentation for AdjacencyList<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn with_node_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeInterner::with_capacity(capacity),
            edges: Vec::new(),
            out_adj: Vec::with_capacity(capacity),
            in_adj: Vec::with_capacity(capacity),
        }
    }
}

impl<K, W> GraphBase for AdjacencyList<K, W>
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
            self.out_edges(from)
                .filter(move |eid| self.edges[eid.0].to == to),
        )
    }
    fn out_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        match self.out_adj.get(v.0) {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.out_edges(v).map(move |eid| self.edges[eid.0].to))
    }
    fn predecessors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        match self.in_adj.get(v.0) {
            Some(list) => Box::new(list.iter().map(move |eid| self.edges[eid.0].from)),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<K, W> EdgeWeights for AdjacencyList<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn weight_of(&self, e: EdgeId) -> W {
        self.edges[e.0].weight
    }
}

impl<K, W> MutableStorage for AdjacencyList<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn add_node(&mut self, key: K) -> NodeId {
        let id = self.nodes.intern(key);
        self.ensure_slot(id);
        id
    }

    fn add_arc(&mut self, from: NodeId, to: NodeId, weight: W) -> EdgeId {
        self.ensure_slot(from);
        self.ensure_slot(to);
        let eid = EdgeId(self.edges.len());
        self.out_adj[from.0].push(eid);
        self.in_adj[to.0].push(eid);
        self.edges.push(EdgeRecord::new(from, to, weight));
        eid
    }

    fn clear_arcs(&mut self) {
        self.edges.clear();
        self.out_adj.iter_mut().for_each(Vec::clear);
        self.in_adj.iter_mut().for_each(Vec::clear);
    }
}

impl<K, W, Target> StorageConvert<Target> for AdjacencyList<K, W>
where
    Target: From<GraphDefinition<K, W>>,
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn convert(&self) -> Target {
        Target::from(self.to_graph_def())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AdjacencyList<usize, i64> {
        let mut al = AdjacencyList::new();
        for v in 1..=4 {
            al.add_node(v);
        }
        al.add_arc_by_key(1, 3, 2);
        al.add_arc_by_key(1, 2, 5);
        al.add_arc_by_key(4, 1, 1);
        al
    }

    #[test]
    fn successors_keep_insertion_order() {
        let al = sample();
        let succ: Vec<usize> = al.successors(NodeId(0)).map(|v| *al.node_key(v)).collect();
        assert_eq!(succ, vec![3, 2]);
        let pred: Vec<usize> = al.predecessors(NodeId(0)).map(|v| *al.node_key(v)).collect();
        assert_eq!(pred, vec![4]);
        assert_eq!(al.out_degree(NodeId(1)), 0);
    }

    #[test]
    fn edges_between_finds_the_weighted_arc() {
        let al = sample();
        let arcs: Vec<EdgeId> = al.edges_between(NodeId(0), NodeId(1)).collect();
        assert_eq!(arcs.len(), 1);
        assert_eq!(al.weight_of(arcs[0]), 5);
    }

    #[test]
    fn clearing_arcs_keeps_nodes() {
        let mut al = sample();
        al.clear_arcs();
        assert_eq!(al.order(), 4);
        assert_eq!(al.size(), 0);
        assert_eq!(al.successors(NodeId(0)).count(), 0);
    }
}
