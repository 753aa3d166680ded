//! Dense adjacency matrix stored as flat Vec<Option<EdgeId>> referencing the edges Vec.
//! The matrix is a presence map of arcs; weights live in the edge records. A later arc
//! between the same ordered pair replaces the earlier one in the matrix.

use crate::core::{EdgeId, NodeId, Weight};
use crate::interner::NodeInterner;
use crate::storage::graph_definition::{EdgeRecord, GraphDefinition};
use crate::traits::{EdgeWeights, GraphBase, MutableStorage, StorageConvert, StorageRepresentation};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct AdjacencyMatrix<K = usize, W = i64>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    pub n: usize,
    pub nodes: NodeInterner<K>,
    pub edges: Vec<EdgeRecord<W>>,
    pub data: Vec<Option<EdgeId>>,
}

impl<K, W> AdjacencyMatrix<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    pub fn new(n: usize) -> Self {
        Self {
            n: 0,
            nodes: NodeInterner::with_capacity(n),
            edges: Vec::new(),
            data: Vec::with_capacity(n * n),
        }
    }

    #[inline]
    fn idx(&self, r: usize, c: usize) -> usize {
        r * self.n + c
    }

    /// Grow to `n_new` columns, moving existing rows to their new offsets.
    fn grow(&mut self, n_new: usize) {
        if n_new <= self.n {
            return;
        }
        let mut data = vec![None; n_new * n_new];
        for r in 0..self.n {
            for c in 0..self.n {
                data[r * n_new + c] = self.data[r * self.n + c];
            }
        }
        self.data = data;
        self.n = n_new;
    }

    pub fn from_graphdef(def: GraphDefinition<K, W>) -> Self {
        let n = def.nodes.len();
        let mut mat = Self {
            n,
            nodes: def.nodes,
            edges: Vec::with_capacity(def.edges.len()),
            data: vec![None; n * n],
        };
        for er in def.edges {
            mat.add_arc(er.from, er.to, er.weight);
        }
        mat
    }

    pub fn arc_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if from.0 >= self.n || to.0 >= self.n {
            return None;
        }
        self.data[self.idx(from.0, to.0)]
    }

    pub fn weight_between(&self, from: NodeId, to: NodeId) -> Option<W> {
        self.arc_between(from, to).map(|e| self.edges[e.0].weight)
    }

    pub fn row(&self, u: NodeId) -> &[Option<EdgeId>] {
        let start = u.0 * self.n;
        &self.data[start..start + self.n]
    }

    pub fn to_graph_def(&self) -> GraphDefinition<K, W> {
        GraphDefinition {
            nodes: self.nodes.clone(),
            edges: self
                .data
                .iter()
                .flatten()
                .map(|e| self.edges[e.0].clone())
                .collect(),
        }
    }
}

impl<K, W> From<GraphDefinition<K, W>> for AdjacencyMatrix<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn from(def: GraphDefinition<K, W>) -> Self {
        AdjacencyMatrix::from_graphdef(def)
    }
}

impl<K, W> StorageRepresentation for AdjacencyMatrix<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn with_node_capacity(capacity: usize) -> Self {
        Self::new(capacity)
    }
}

impl<K, W> GraphBase for AdjacencyMatrix<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    type Key = K;
    type Weight = W;

    fn order(&self) -> usize {
        self.n
    }
    /// Arcs currently present in the matrix.
    fn size(&self) -> usize {
        self.data.iter().flatten().count()
    }

    fn node_id(&self, key: &K) -> Option<NodeId> {
        self.nodes.get_id(key)
    }
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new((0..self.n).map(NodeId))
    }
    fn node_key(&self, id: NodeId) -> &K {
        self.nodes.key(id)
    }

    fn edge_ids(&self) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new(self.data.iter().flatten().copied())
    }
    fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId) {
        let r = &self.edges[e.0];
        (r.from, r.to)
    }
    fn edges_between(&self, from: NodeId, to: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new(self.arc_between(from, to).into_iter())
    }
    fn out_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        if v.0 >= self.n {
            return Box::new(std::iter::empty());
        }
        Box::new(self.row(v).iter().flatten().copied())
    }

    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.out_edges(v).map(move |e| self.edges[e.0].to))
    }
    fn predecessors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        if v.0 >= self.n {
            return Box::new(std::iter::empty());
        }
        Box::new((0..self.n).filter_map(move |u| self.data[self.idx(u, v.0)].map(|_| NodeId(u))))
    }
}

impl<K, W> EdgeWeights for AdjacencyMatrix<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn weight_of(&self, e: EdgeId) -> W {
        self.edges[e.0].weight
    }
}

impl<K, W> MutableStorage for AdjacencyMatrix<K, W>
where
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn add_node(&mut self, key: K) -> NodeId {
        let id = self.nodes.intern(key);
        self.grow(self.nodes.len());
        id
    }

    fn add_arc(&mut self, from: NodeId, to: NodeId, weight: W) -> EdgeId {
        self.grow(from.0.max(to.0) + 1);
        let eid = EdgeId(self.edges.len());
        self.edges.push(EdgeRecord::new(from, to, weight));
        let i = self.idx(from.0, to.0);
        self.data[i] = Some(eid);
        eid
    }

    fn clear_arcs(&mut self) {
        self.edges.clear();
        self.data.iter_mut().for_each(|cell| *cell = None);
    }
}

impl<K, W, Target> StorageConvert<Target> for AdjacencyMatrix<K, W>
where
    Target: From<GraphDefinition<K, W>>,
    K: Debug + Clone + Eq + Hash,
    W: Weight,
{
    fn convert(&self) -> Target {
        Target::from(self.to_graph_def())
    }
}
