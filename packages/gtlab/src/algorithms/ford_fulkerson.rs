use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Display};
use std::hash::Hash;

use log::debug;

use crate::error::{LabError, Result};
use crate::report::ReportDisplay;
use crate::storage::AdjacencyMatrix;
use crate::{
    DirectedGraph, EdgeWeights, Graph, GraphBase, MutableStorage, NodeId, StorageConvert,
    StorageRepresentation,
};

/// Flow pushed along each arc of the network. Pushing against an arc without capacity cancels
/// flow on the opposite arc instead.
#[derive(Clone, Debug, Default)]
pub struct Flow {
    map: HashMap<(NodeId, NodeId), i64>,
}

impl Flow {
    pub fn get(&self, from: NodeId, to: NodeId) -> i64 {
        self.map.get(&(from, to)).copied().unwrap_or(0)
    }

    fn add(&mut self, from: NodeId, to: NodeId, amount: i64) {
        *self.map.entry((from, to)).or_insert(0) += amount;
    }
}

/// Capacities are the arc weights of a dense matrix, so successors come in index order.
#[derive(Clone, Debug)]
pub struct FlowNetwork<K>
where
    K: Debug + Clone + Eq + Hash,
{
    pub graph: DirectedGraph<AdjacencyMatrix<K, i64>>,
    pub source: NodeId,
    pub sink: NodeId,
    pub flow: Flow,
}

impl<K> FlowNetwork<K>
where
    K: Debug + Clone + Eq + Hash,
{
    pub fn new(graph: DirectedGraph<AdjacencyMatrix<K, i64>>, source: NodeId, sink: NodeId) -> Self {
        Self {
            graph,
            source,
            sink,
            flow: Flow::default(),
        }
    }

    /// Convert a weighted digraph into a network. The source is the vertex with the largest
    /// total outgoing capacity and the sink the one with the largest incoming capacity; ties go
    /// to the lower id.
    pub fn from_graph<S>(graph: DirectedGraph<S>) -> Result<Self>
    where
        S: StorageRepresentation<Key = K, Weight = i64> + StorageConvert<AdjacencyMatrix<K, i64>>,
    {
        let graph: DirectedGraph<AdjacencyMatrix<K, i64>> = graph.into_storage();
        let n = graph.order();
        if n == 0 {
            return Err(LabError::EmptyGraph);
        }
        let mut out_cap = vec![0i64; n];
        let mut in_cap = vec![0i64; n];
        for e in graph.edge_ids() {
            let (u, v) = graph.endpoints(e);
            let w = graph.weight_of(e);
            out_cap[u.0] += w;
            in_cap[v.0] += w;
        }
        let source = first_max(&out_cap);
        let sink = first_max(&in_cap);
        Ok(Self::new(graph, source, sink))
    }

    pub fn capacity(&self, from: NodeId, to: NodeId) -> i64 {
        self.graph.storage().weight_between(from, to).unwrap_or(0)
    }
}

fn first_max(values: &[i64]) -> NodeId {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    NodeId(best)
}

/// Residual capacities `c(u, v) - f(u, v) + f(v, u)`; only positive ones become arcs.
pub fn residual_network<K>(network: &FlowNetwork<K>) -> DirectedGraph<AdjacencyMatrix<K, i64>>
where
    K: Debug + Clone + Eq + Hash,
{
    let mut residual = network.graph.clone();
    residual.storage_mut().clear_arcs();
    let n = network.graph.order();
    for u in 0..n {
        for v in 0..n {
            let (u, v) = (NodeId(u), NodeId(v));
            let r = network.capacity(u, v) - network.flow.get(u, v) + network.flow.get(v, u);
            if r > 0 {
                residual.storage_mut().add_arc(u, v, r);
            }
        }
    }
    residual
}

/// One augmenting path and the amount pushed along it.
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentationStep<K> {
    pub path: Vec<K>,
    pub bottleneck: i64,
}

pub struct FordFulkersonResult<K> {
    pub max_flow: i64,
    pub source: K,
    pub sink: K,
    /// `(from, to, flow)` for every input arc carrying positive flow, sorted.
    pub arc_flows: Vec<(K, K, i64)>,
    pub steps: Vec<AugmentationStep<K>>,
}

impl<K: Display> ReportDisplay for FordFulkersonResult<K> {
    fn to_report(&self) -> String {
        let mut lines = vec![
            format!("Maximum flow value: {}.", self.max_flow),
            format!("Source: {}, sink: {}.", self.source, self.sink),
            "Flow:".to_string(),
        ];
        lines.extend(
            self.arc_flows
                .iter()
                .map(|(u, v, f)| format!("{u}-{v} : {f}")),
        );
        lines.join("\n")
    }
}

/// Shortest augmenting path in the residual network, as parent links from the sink back to the
/// source.
fn bfs_path<K>(residual: &DirectedGraph<AdjacencyMatrix<K, i64>>, source: NodeId, sink: NodeId) -> Option<Vec<NodeId>>
where
    K: Debug + Clone + Eq + Hash,
{
    if source == sink {
        return None;
    }
    let mut parent: Vec<Option<NodeId>> = vec![None; residual.order()];
    let mut visited = vec![false; residual.order()];
    let mut queue = VecDeque::from([source]);
    visited[source.0] = true;
    'search: while let Some(u) = queue.pop_front() {
        for v in residual.successors(u) {
            if !visited[v.0] {
                visited[v.0] = true;
                parent[v.0] = Some(u);
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }
    }

    parent[sink.0]?;
    let mut path = vec![sink];
    let mut v = sink;
    while let Some(u) = parent[v.0] {
        path.push(u);
        v = u;
    }
    path.reverse();
    Some(path)
}

/// Edmonds–Karp flavour of Ford–Fulkerson: augment along BFS paths of the residual network
/// until the sink is unreachable.
pub fn ford_fulkerson<K>(mut network: FlowNetwork<K>) -> FordFulkersonResult<K>
where
    K: Debug + Clone + Eq + Hash + Ord,
{
    let mut steps = Vec::new();
    let mut max_flow = 0;

    loop {
        let residual = residual_network(&network);
        let Some(path) = bfs_path(&residual, network.source, network.sink) else {
            break;
        };
        let bottleneck = path
            .windows(2)
            .filter_map(|w| residual.storage().weight_between(w[0], w[1]))
            .min()
            .unwrap_or(0);
        for w in path.windows(2) {
            let (u, v) = (w[0], w[1]);
            if network.capacity(u, v) > 0 {
                network.flow.add(u, v, bottleneck);
            } else {
                network.flow.add(v, u, -bottleneck);
            }
        }
        max_flow += bottleneck;
        steps.push(AugmentationStep {
            path: path
                .iter()
                .map(|&v| network.graph.node_key(v).clone())
                .collect(),
            bottleneck,
        });
    }

    let key = |v: NodeId| network.graph.node_key(v).clone();
    let mut arc_flows: Vec<(K, K, i64)> = network
        .graph
        .edge_ids()
        .filter_map(|e| {
            let (u, v) = network.graph.endpoints(e);
            let f = network.flow.get(u, v);
            (f > 0 && network.capacity(u, v) > 0).then(|| (key(u), key(v), f))
        })
        .collect();
    arc_flows.sort();
    debug!(
        "max flow {} after {} augmentation(s)",
        max_flow,
        steps.len()
    );

    FordFulkersonResult {
        max_flow,
        source: key(network.source),
        sink: key(network.sink),
        arc_flows,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{GraphFormat, parse_graph};

    fn network(text: &str) -> FlowNetwork<usize> {
        let g = parse_graph(text, GraphFormat::EdgeList).unwrap();
        FlowNetwork::from_graph(g.as_directed()).unwrap()
    }

    #[test]
    fn undirected_input_converts_to_two_arcs_per_edge() {
        let g = parse_graph("2\n1 2 4\n2 1 4\n", GraphFormat::EdgeList).unwrap();
        assert!(!g.is_directed());
        let net = FlowNetwork::from_graph(g.as_directed()).unwrap();
        assert_eq!(net.capacity(NodeId(0), NodeId(1)), 4);
        assert_eq!(net.capacity(NodeId(1), NodeId(0)), 4);
        assert_eq!(net.graph.size(), 2);
    }

    #[test]
    fn augments_along_shortest_paths_first() {
        let net = network("4\n1 2 3\n1 3 2\n2 3 1\n2 4 2\n3 4 4\n");
        assert_eq!((net.source, net.sink), (NodeId(0), NodeId(3)));
        let result = ford_fulkerson(net);
        assert_eq!(result.max_flow, 5);
        assert_eq!(result.steps.iter().map(|s| s.bottleneck).sum::<i64>(), 5);
        assert_eq!(result.steps[0].path, vec![1, 2, 4]);
        let out_of_source: i64 = result
            .arc_flows
            .iter()
            .filter(|(u, _, _)| *u == 1)
            .map(|(_, _, f)| f)
            .sum();
        assert_eq!(out_of_source, 5);
    }

    #[test]
    fn report_lists_arcs_with_flow() {
        let result = ford_fulkerson(network("3\n1 2 5\n2 3 3\n1 3 4\n"));
        assert_eq!(
            result.to_report(),
            "Maximum flow value: 7.\nSource: 1, sink: 3.\nFlow:\n1-2 : 3\n1-3 : 4\n2-3 : 3"
        );
    }

    #[test]
    fn residual_network_adds_reverse_arcs() {
        let mut net = network("2\n1 2 5\n");
        net.flow.add(NodeId(0), NodeId(1), 2);
        let residual = residual_network(&net);
        assert_eq!(residual.storage().weight_between(NodeId(0), NodeId(1)), Some(3));
        assert_eq!(residual.storage().weight_between(NodeId(1), NodeId(0)), Some(2));
    }

    #[test]
    fn ties_pick_the_first_vertex() {
        let net = network("3\n1 3 2\n2 3 2\n");
        assert_eq!(net.source, NodeId(0));
        assert_eq!(net.sink, NodeId(2));
    }
}
