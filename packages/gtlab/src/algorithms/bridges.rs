use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::report::{ReportDisplay, list, pair_list};
use crate::{GraphBase, NodeId};

/// How bridges are listed in the report.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeOrder {
    /// Deduplicated and sorted.
    #[default]
    Sorted,
    /// In the order the depth-first search confirms them.
    Discovery,
}

pub struct BridgesResult<K> {
    /// Each bridge as `(min, max)`.
    pub bridges: Vec<(K, K)>,
    /// Sorted cut vertices.
    pub cut_vertices: Vec<K>,
}

impl<K: Display> ReportDisplay for BridgesResult<K> {
    fn to_report(&self) -> String {
        format!(
            "Bridges:\n {}\nCut vertices:\n {}",
            pair_list(&self.bridges),
            list(&self.cut_vertices)
        )
    }
}

struct Frame {
    v: NodeId,
    parent: Option<NodeId>,
    next: Vec<NodeId>,
    i: usize,
    children: usize,
}

/// Tarjan's low-link search. The traversal visits successors in storage order, exactly as the
/// recursive formulation would, using an explicit frame stack. An arc back to the DFS parent is
/// never treated as a back edge.
pub fn bridges_and_cut_vertices<G>(graph: &G, order: BridgeOrder) -> BridgesResult<G::Key>
where
    G: GraphBase,
    G::Key: Ord,
{
    let n = graph.order();
    let mut tin = vec![0usize; n];
    let mut low = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut is_cut = vec![false; n];
    let mut timer = 0;
    let mut found: Vec<(NodeId, NodeId)> = Vec::new();

    for root in graph.node_ids() {
        if visited[root.0] {
            continue;
        }
        visited[root.0] = true;
        timer += 1;
        tin[root.0] = timer;
        low[root.0] = timer;
        let mut stack = vec![Frame {
            v: root,
            parent: None,
            next: graph.successors(root).collect(),
            i: 0,
            children: 0,
        }];

        while let Some(top) = stack.last_mut() {
            if let Some(&to) = top.next.get(top.i) {
                top.i += 1;
                let v = top.v;
                if Some(to) == top.parent {
                    continue;
                }
                if visited[to.0] {
                    low[v.0] = low[v.0].min(tin[to.0]);
                } else {
                    visited[to.0] = true;
                    timer += 1;
                    tin[to.0] = timer;
                    low[to.0] = timer;
                    stack.push(Frame {
                        v: to,
                        parent: Some(v),
                        next: graph.successors(to).collect(),
                        i: 0,
                        children: 0,
                    });
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            if done.parent.is_none() && done.children > 1 {
                is_cut[done.v.0] = true;
            }
            if let Some(parent) = stack.last_mut() {
                let (u, to) = (parent.v, done.v);
                parent.children += 1;
                low[u.0] = low[u.0].min(low[to.0]);
                if low[to.0] > tin[u.0] {
                    found.push((u, to));
                }
                if low[to.0] >= tin[u.0] && parent.parent.is_some() {
                    is_cut[u.0] = true;
                }
            }
        }
    }

    let mut bridges: Vec<(G::Key, G::Key)> = found
        .into_iter()
        .map(|(u, v)| {
            let (a, b) = (graph.node_key(u).clone(), graph.node_key(v).clone());
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    if order == BridgeOrder::Sorted {
        bridges.sort();
        bridges.dedup();
    }
    let mut cut_vertices: Vec<G::Key> = graph
        .node_ids()
        .filter(|v| is_cut[v.0])
        .map(|v| graph.node_key(v).clone())
        .collect();
    cut_vertices.sort();
    debug!(
        "bridges: {} bridge(s), {} cut vertex(es)",
        bridges.len(),
        cut_vertices.len()
    );

    BridgesResult {
        bridges,
        cut_vertices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{GraphFormat, parse_graph};

    #[test]
    fn path_with_a_triangle() {
        // 1-2, 2-3, 3-4, 4-2: bridge 1-2, cut vertex 2.
        let g = parse_graph("4\n2\n1 3 4\n2 4\n3 2\n", GraphFormat::AdjacencyList).unwrap();
        let result = bridges_and_cut_vertices(g.storage(), BridgeOrder::Sorted);
        assert_eq!(result.bridges, vec![(1, 2)]);
        assert_eq!(result.cut_vertices, vec![2]);
        assert_eq!(result.to_report(), "Bridges:\n [(1, 2)]\nCut vertices:\n [2]");
    }

    #[test]
    fn discovery_order_lists_bridges_as_the_search_finishes_them() {
        // Star centred on 1 with leaves 3 and 2, then a tail 2-4.
        let g = parse_graph("4\n3 2\n1 4\n1\n2\n", GraphFormat::AdjacencyList).unwrap();
        let sorted = bridges_and_cut_vertices(g.storage(), BridgeOrder::Sorted);
        assert_eq!(sorted.bridges, vec![(1, 2), (1, 3), (2, 4)]);
        let found = bridges_and_cut_vertices(g.storage(), BridgeOrder::Discovery);
        assert_eq!(found.bridges, vec![(1, 3), (2, 4), (1, 2)]);
        assert_eq!(found.cut_vertices, vec![1, 2]);
    }

    #[test]
    fn cycle_has_no_bridges() {
        let g = parse_graph("3\n2 3\n1 3\n1 2\n", GraphFormat::AdjacencyList).unwrap();
        let result = bridges_and_cut_vertices(g.storage(), BridgeOrder::Sorted);
        assert_eq!(result.to_report(), "Bridges:\n []\nCut vertices:\n []");
    }
}
