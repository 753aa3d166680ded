use std::collections::VecDeque;
use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::report::{ReportDisplay, list};
use crate::{Graph, GraphBase, NodeId};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    #[default]
    Dfs,
    Bfs,
}

/// Visit everything reachable from `start` through `next`, marking `visited`.
/// The returned order is the visiting order of the chosen traversal.
fn explore<F, I>(start: NodeId, visited: &mut [bool], traversal: Traversal, next: F) -> Vec<NodeId>
where
    F: Fn(NodeId) -> I,
    I: Iterator<Item = NodeId>,
{
    let mut order = Vec::new();
    let mut frontier = VecDeque::from([start]);
    visited[start.0] = true;
    loop {
        let v = match traversal {
            Traversal::Dfs => frontier.pop_back(),
            Traversal::Bfs => frontier.pop_front(),
        };
        let Some(v) = v else { break };
        order.push(v);
        for w in next(v) {
            if !visited[w.0] {
                visited[w.0] = true;
                frontier.push_back(w);
            }
        }
    }
    order
}

/// Components of an undirected graph, seeded from vertices in id order.
pub fn connected_components<G>(graph: &G, traversal: Traversal) -> Vec<Vec<NodeId>>
where
    G: GraphBase,
{
    let mut visited = vec![false; graph.order()];
    let mut components = Vec::new();
    for v in graph.node_ids() {
        if !visited[v.0] {
            components.push(explore(v, &mut visited, traversal, |u| graph.successors(u)));
        }
    }
    components
}

/// Components of the graph with arc directions ignored.
pub fn weak_components<G>(graph: &G) -> Vec<Vec<NodeId>>
where
    G: GraphBase,
{
    let mut visited = vec![false; graph.order()];
    let mut components = Vec::new();
    for v in graph.node_ids() {
        if !visited[v.0] {
            components.push(explore(v, &mut visited, Traversal::Dfs, |u| {
                graph.neighborhood(u)
            }));
        }
    }
    components
}

pub struct ConnectivityResult<K> {
    pub directed: bool,
    /// Each component sorted; components ordered by size then smallest vertex.
    pub components: Vec<Vec<K>>,
}

impl<K> ConnectivityResult<K> {
    pub fn is_connected(&self) -> bool {
        self.components.len() == 1
    }
}

impl<K: Display> ReportDisplay for ConnectivityResult<K> {
    fn to_report(&self) -> String {
        let kind = if self.directed { "Diraph" } else { "Graph" };
        let not = if self.is_connected() { "" } else { "not " };
        let mut lines = vec![
            format!("{kind} is {not}connected"),
            String::new(),
            "Connected components:".to_string(),
        ];
        lines.extend(self.components.iter().map(list));
        lines.join("\n")
    }
}

pub(crate) fn sorted_keys<G>(graph: &G, ids: &[NodeId]) -> Vec<G::Key>
where
    G: GraphBase,
    G::Key: Ord,
{
    let mut keys: Vec<G::Key> = ids.iter().map(|&v| graph.node_key(v).clone()).collect();
    keys.sort();
    keys
}

/// Connected components for undirected graphs, weak components for digraphs.
pub fn connectivity<G>(graph: &G, traversal: Traversal) -> ConnectivityResult<G::Key>
where
    G: Graph,
    G::Key: Ord,
{
    let raw = if graph.is_directed() {
        weak_components(graph)
    } else {
        connected_components(graph, traversal)
    };
    let mut components: Vec<Vec<G::Key>> = raw.iter().map(|c| sorted_keys(graph, c)).collect();
    components.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.first().cmp(&b.first())));
    debug!("connectivity: {} component(s)", components.len());
    ConnectivityResult {
        directed: graph.is_directed(),
        components,
    }
}

pub struct SpanningTree<K> {
    /// Tree edges as `(min, max)`, sorted.
    pub edges: Vec<(K, K)>,
}

impl<K: Display> ReportDisplay for SpanningTree<K> {
    fn to_report(&self) -> String {
        let mut lines = vec!["Spanning tree:".to_string()];
        lines.extend(self.edges.iter().map(|(u, v)| format!("{u}-{v}")));
        lines.join("\n")
    }
}

/// Spanning forest of an undirected graph. The DFS variant follows the order a recursive
/// depth-first search would take; the BFS variant links each vertex to the vertex it was
/// discovered from.
pub fn spanning_tree<G>(graph: &G, traversal: Traversal) -> SpanningTree<G::Key>
where
    G: GraphBase,
    G::Key: Ord,
{
    let n = graph.order();
    let mut visited = vec![false; n];
    let mut tree: Vec<(NodeId, NodeId)> = Vec::new();

    for root in graph.node_ids() {
        if visited[root.0] {
            continue;
        }
        visited[root.0] = true;
        match traversal {
            Traversal::Dfs => {
                let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> =
                    vec![(root, graph.successors(root).collect(), 0)];
                while let Some((u, next, i)) = stack.last_mut() {
                    let Some(&v) = next.get(*i) else {
                        stack.pop();
                        continue;
                    };
                    *i += 1;
                    if !visited[v.0] {
                        visited[v.0] = true;
                        tree.push((*u, v));
                        stack.push((v, graph.successors(v).collect(), 0));
                    }
                }
            }
            Traversal::Bfs => {
                let mut queue = VecDeque::from([root]);
                while let Some(u) = queue.pop_front() {
                    for v in graph.successors(u) {
                        if !visited[v.0] {
                            visited[v.0] = true;
                            tree.push((u, v));
                            queue.push_back(v);
                        }
                    }
                }
            }
        }
    }

    let mut edges: Vec<(G::Key, G::Key)> = tree
        .into_iter()
        .map(|(u, v)| {
            let (a, b) = (graph.node_key(u).clone(), graph.node_key(v).clone());
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    edges.sort();
    edges.dedup();
    SpanningTree { edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{GraphFormat, LoadedGraph, parse_graph};

    fn undirected(text: &str) -> crate::UndirectedGraph<crate::io::LabStorage> {
        match parse_graph(text, GraphFormat::EdgeList).unwrap() {
            LoadedGraph::Undirected(g) => g,
            LoadedGraph::Directed(_) => panic!("expected an undirected graph"),
        }
    }

    #[test]
    fn components_are_ordered_by_size_then_first_vertex() {
        let g = undirected("6\n1 5\n5 1\n5 3\n3 5\n2 4\n4 2\n");
        for traversal in [Traversal::Dfs, Traversal::Bfs] {
            let result = connectivity(&g, traversal);
            assert_eq!(result.components, vec![vec![6], vec![2, 4], vec![1, 3, 5]]);
            assert_eq!(
                result.to_report(),
                "Graph is not connected\n\nConnected components:\n[6]\n[2, 4]\n[1, 3, 5]"
            );
        }
    }

    #[test]
    fn digraph_uses_weak_components() {
        let g = parse_graph("3\n1 2\n3 2\n", GraphFormat::EdgeList)
            .unwrap()
            .as_directed();
        let result = connectivity(&g, Traversal::Bfs);
        assert_eq!(
            result.to_report(),
            "Diraph is connected\n\nConnected components:\n[1, 2, 3]"
        );
    }

    #[test]
    fn dfs_tree_follows_recursive_order() {
        // Recursive DFS from 1 goes 1-2, 2-3, 3-4; BFS takes 1-2, 1-3, 1-4.
        let g = undirected(
            "4\n1 2\n2 1\n1 3\n3 1\n1 4\n4 1\n2 3\n3 2\n3 4\n4 3\n",
        );
        let dfs = spanning_tree(&g, Traversal::Dfs);
        assert_eq!(dfs.edges, vec![(1, 2), (2, 3), (3, 4)]);
        let bfs = spanning_tree(&g, Traversal::Bfs);
        assert_eq!(bfs.edges, vec![(1, 2), (1, 3), (1, 4)]);
        assert_eq!(bfs.to_report(), "Spanning tree:\n1-2\n1-3\n1-4");
    }

    #[test]
    fn spanning_forest_covers_every_component() {
        let g = undirected("4\n1 2\n2 1\n3 4\n4 3\n");
        assert_eq!(spanning_tree(&g, Traversal::Dfs).edges, vec![(1, 2), (3, 4)]);
    }
}
