//! DirectedGraph and UndirectedGraph wrappers. They wrap a storage representation S,
//! expose the Graph trait to algorithms and delegate mutations to the underlying storage.
//! An undirected edge is kept as two opposite arcs, so `successors` is the full neighbour list.

use crate::core::{EdgeId, NodeId};
use crate::error::GraphError;
use crate::traits::*;

pub trait Graph:
    GraphBase<
        Key = <Self::Storage as GraphBase>::Key,
        Weight = <Self::Storage as GraphBase>::Weight,
    > + EdgeWeights
{
    type Storage: StorageRepresentation;

    fn storage(&self) -> &Self::Storage;
    fn storage_mut(&mut self) -> &mut Self::Storage;
    fn is_directed(&self) -> bool;
}

fn has_arc<S: GraphBase>(storage: &S, from: NodeId, to: NodeId) -> bool {
    storage.edges_between(from, to).next().is_some()
}

#[derive(Clone, Debug)]
pub struct DirectedGraph<S>
where
    S: StorageRepresentation,
{
    pub storage: S,
}

impl<S> DirectedGraph<S>
where
    S: StorageRepresentation,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_storage<TargetS>(self) -> DirectedGraph<TargetS>
    where
        S: StorageConvert<TargetS>,
        TargetS: StorageRepresentation,
    {
        DirectedGraph::new(self.storage.convert())
    }
}

impl<S> DirectedGraph<S>
where
    S: MutableStorage,
{
    /// Adds `from -> to`; a second arc between the same ordered pair is rejected.
    pub fn add_arc_checked(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: S::Weight,
    ) -> Result<EdgeId, GraphError> {
        if has_arc(&self.storage, from, to) {
            return Err(GraphError::ParallelEdge {
                from: from.0,
                to: to.0,
            });
        }
        Ok(self.storage.add_arc(from, to, weight))
    }

    pub fn add_arc_by_key_checked(
        &mut self,
        from_key: S::Key,
        to_key: S::Key,
        weight: S::Weight,
    ) -> Result<EdgeId, GraphError> {
        let from = self.storage.add_node(from_key);
        let to = self.storage.add_node(to_key);
        self.add_arc_checked(from, to, weight)
    }

    pub fn from_vertices_and_edges<NI, EI>(nodes: NI, edges: EI) -> Result<Self, GraphError>
    where
        NI: IntoIterator<Item = S::Key>,
        EI: IntoIterator<Item = (S::Key, S::Key, S::Weight)>,
    {
        let nodes: Vec<S::Key> = nodes.into_iter().collect();
        let mut storage = S::with_node_capacity(nodes.len());
        for key in nodes {
            storage.add_node(key);
        }
        let mut graph = Self::new(storage);
        for (from, to, weight) in edges {
            graph.add_arc_by_key_checked(from, to, weight)?;
        }
        Ok(graph)
    }

    pub fn from_edges<EI>(edges: EI) -> Result<Self, GraphError>
    where
        EI: IntoIterator<Item = (S::Key, S::Key, S::Weight)>,
    {
        Self::from_vertices_and_edges(std::iter::empty(), edges)
    }
}

impl<S> Graph for DirectedGraph<S>
where
    S: StorageRepresentation,
{
    type Storage = S;
    fn storage(&self) -> &S {
        &self.storage
    }
    fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
    fn is_directed(&self) -> bool {
        true
    }
}

impl<S> GraphBase for DirectedGraph<S>
where
    S: StorageRepresentation,
{
    type Key = S::Key;
    type Weight = S::Weight;

    fn order(&self) -> usize {
        self.storage.order()
    }
    fn size(&self) -> usize {
        self.storage.size()
    }

    fn node_id(&self, key: &Self::Key) -> Option<NodeId> {
        self.storage.node_id(key)
    }
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.node_ids()
    }
    fn node_key(&self, id: NodeId) -> &Self::Key {
        self.storage.node_key(id)
    }

    fn edge_ids(&self) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        self.storage.edge_ids()
    }
    fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId) {
        self.storage.endpoints(e)
    }
    fn edges_between(&self, from: NodeId, to: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        self.storage.edges_between(from, to)
    }
    fn out_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        self.storage.out_edges(v)
    }

    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.successors(v)
    }
    fn predecessors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.predecessors(v)
    }
}

impl<S> EdgeWeights for DirectedGraph<S>
where
    S: StorageRepresentation,
{
    fn weight_of(&self, e: EdgeId) -> S::Weight {
        self.storage.weight_of(e)
    }
}

/// UNDIRECTED WRAPPER
#[derive(Clone, Debug)]
pub struct UndirectedGraph<S>
where
    S: StorageRepresentation,
{
    pub storage: S,
}

impl<S> UndirectedGraph<S>
where
    S: StorageRepresentation,
{
    /// Wraps storage that already holds both arcs of every edge.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_storage<TargetS>(self) -> UndirectedGraph<TargetS>
    where
        S: StorageConvert<TargetS>,
        TargetS: StorageRepresentation,
    {
        UndirectedGraph::new(self.storage.convert())
    }

    /// Reinterpret the stored arcs as a digraph (each edge becomes a 2-cycle).
    pub fn into_directed(self) -> DirectedGraph<S> {
        DirectedGraph::new(self.storage)
    }
}

impl<S> UndirectedGraph<S>
where
    S: MutableStorage,
{
    /// Adds edge `{a, b}` as arcs `a -> b` and `b -> a`. A self-loop is a single arc and both
    /// returned ids are the same.
    pub fn add_edge_checked(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: S::Weight,
    ) -> Result<(EdgeId, EdgeId), GraphError> {
        if has_arc(&self.storage, a, b) {
            return Err(GraphError::ParallelEdge { from: a.0, to: b.0 });
        }
        let e1 = self.storage.add_arc(a, b, weight);
        if a == b {
            return Ok((e1, e1));
        }
        let e2 = self.storage.add_arc(b, a, weight);
        Ok((e1, e2))
    }

    pub fn add_edge_by_key_checked(
        &mut self,
        a_key: S::Key,
        b_key: S::Key,
        weight: S::Weight,
    ) -> Result<(EdgeId, EdgeId), GraphError> {
        let a = self.storage.add_node(a_key);
        let b = self.storage.add_node(b_key);
        self.add_edge_checked(a, b, weight)
    }

    pub fn from_vertices_and_edges<NI, EI>(nodes: NI, edges: EI) -> Result<Self, GraphError>
    where
        NI: IntoIterator<Item = S::Key>,
        EI: IntoIterator<Item = (S::Key, S::Key, S::Weight)>,
    {
        let nodes: Vec<S::Key> = nodes.into_iter().collect();
        let mut storage = S::with_node_capacity(nodes.len());
        for key in nodes {
            storage.add_node(key);
        }
        let mut graph = Self::new(storage);
        for (a, b, weight) in edges {
            graph.add_edge_by_key_checked(a, b, weight)?;
        }
        Ok(graph)
    }

    pub fn from_edges<EI>(edges: EI) -> Result<Self, GraphError>
    where
        EI: IntoIterator<Item = (S::Key, S::Key, S::Weight)>,
    {
        Self::from_vertices_and_edges(std::iter::empty(), edges)
    }
}

impl<S> Graph for UndirectedGraph<S>
where
    S: StorageRepresentation,
{
    type Storage = S;
    fn storage(&self) -> &S {
        &self.storage
    }
    fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
    fn is_directed(&self) -> bool {
        false
    }
}

impl<S> GraphBase for UndirectedGraph<S>
where
    S: StorageRepresentation,
{
    type Key = S::Key;
    type Weight = S::Weight;

    fn order(&self) -> usize {
        self.storage.order()
    }
    fn size(&self) -> usize {
        self.storage.size()
    }

    fn node_id(&self, key: &Self::Key) -> Option<NodeId> {
        self.storage.node_id(key)
    }
    fn node_ids(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.node_ids()
    }
    fn node_key(&self, id: NodeId) -> &Self::Key {
        self.storage.node_key(id)
    }

    fn edge_ids(&self) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        self.storage.edge_ids()
    }
    fn endpoints(&self, e: EdgeId) -> (NodeId, NodeId) {
        self.storage.endpoints(e)
    }
    fn edges_between(&self, from: NodeId, to: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        self.storage.edges_between(from, to)
    }
    fn out_edges(&self, v: NodeId) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        self.storage.out_edges(v)
    }

    fn neighborhood(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.successors(v)
    }
    fn successors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.successors(v)
    }
    fn predecessors(&self, v: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.storage.successors(v)
    }
}

impl<S> EdgeWeights for UndirectedGraph<S>
where
    S: StorageRepresentation,
{
    fn weight_of(&self, e: EdgeId) -> S::Weight {
        self.storage.weight_of(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AdjacencyList, AdjacencyMatrix};

    #[test]
    fn undirected_edges_are_stored_both_ways() {
        let g: UndirectedGraph<AdjacencyList<usize, i64>> =
            UndirectedGraph::from_vertices_and_edges(1..=3, [(1, 2, 4), (2, 3, 1)]).unwrap();
        assert_eq!(g.size(), 4);
        assert!(!g.is_directed());
        let n2: Vec<usize> = g
            .successors(NodeId(1))
            .map(|v| *g.node_key(v))
            .collect();
        assert_eq!(n2, vec![1, 3]);
    }

    #[test]
    fn parallel_edges_are_rejected() {
        let mut g: UndirectedGraph<AdjacencyList<usize, i64>> =
            UndirectedGraph::from_edges([(1, 2, 1)]).unwrap();
        assert_eq!(
            g.add_edge_by_key_checked(2, 1, 5),
            Err(GraphError::ParallelEdge { from: 1, to: 0 })
        );

        let mut d: DirectedGraph<AdjacencyMatrix<usize, i64>> =
            DirectedGraph::from_edges([(1, 2, 1)]).unwrap();
        assert!(d.add_arc_by_key_checked(2, 1, 1).is_ok());
        assert!(d.add_arc_by_key_checked(1, 2, 3).is_err());
    }

    #[test]
    fn self_loop_is_a_single_arc() {
        let mut g: UndirectedGraph<AdjacencyList<usize, i64>> = UndirectedGraph::new(AdjacencyList::new());
        let (a, b) = g.add_edge_by_key_checked(1, 1, 2).unwrap();
        assert_eq!(a, b);
        assert_eq!(g.size(), 1);
    }

    #[test]
    fn storage_conversion_keeps_arcs() {
        let d: DirectedGraph<AdjacencyList<usize, i64>> =
            DirectedGraph::from_vertices_and_edges(1..=3, [(1, 3, 7), (3, 2, 1)]).unwrap();
        let m: DirectedGraph<AdjacencyMatrix<usize, i64>> = d.into_storage();
        assert_eq!(m.storage().weight_between(NodeId(0), NodeId(2)), Some(7));
        assert_eq!(m.predecessors(NodeId(1)).collect::<Vec<_>>(), vec![NodeId(2)]);
    }
}
