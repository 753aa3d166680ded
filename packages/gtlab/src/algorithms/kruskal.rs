use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::report::ReportDisplay;
use crate::{EdgeWeights, GraphBase, NodeId, Weight};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MstMethod {
    #[default]
    Kruskal,
    Prim,
}

pub struct MinimumSpanningTree<K, W> {
    /// `(u, v, w)` with `u <= v`, sorted by weight then endpoints. `None` if the graph is not
    /// connected.
    pub edges: Option<Vec<(K, K, W)>>,
    pub total_weight: W,
}

impl<K: Display, W: Display> ReportDisplay for MinimumSpanningTree<K, W> {
    fn to_report(&self) -> String {
        match &self.edges {
            Some(edges) => {
                let mut s = String::from("Minimal spanning tree:");
                for (u, v, w) in edges {
                    s.push_str(&format!("\n{u}-{v}: {w}"));
                }
                s
            }
            None => "Graph is not connected".to_string(),
        }
    }
}

/// Helper Disjoint Set Union (DSU) / Union-Find data structure.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
    sets: usize,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut i = i;
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i == root_j {
            return false;
        }
        match self.rank[root_i].cmp(&self.rank[root_j]) {
            Ordering::Less => self.parent[root_i] = root_j,
            Ordering::Greater => self.parent[root_j] = root_i,
            Ordering::Equal => {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
        self.sets -= 1;
        true
    }
}

fn by_weight_then_ends<K: Ord, W: PartialOrd>(a: &(K, K, W), b: &(K, K, W)) -> Ordering {
    a.2.partial_cmp(&b.2)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
        .then_with(|| a.1.cmp(&b.1))
}

/// Every arc as `(min, max, w)` over keys, without repeats. Direction is ignored.
fn normalized_edges<G>(graph: &G) -> Vec<(NodeId, NodeId, G::Weight)>
where
    G: GraphBase + EdgeWeights,
    G::Key: Ord,
{
    let mut edges: Vec<(NodeId, NodeId, G::Weight)> = graph
        .edge_ids()
        .map(|e| {
            let (u, v) = graph.endpoints(e);
            let w = graph.weight_of(e);
            if graph.node_key(u) <= graph.node_key(v) { (u, v, w) } else { (v, u, w) }
        })
        .collect();
    edges.sort_by(|a, b| {
        let key = |e: &(NodeId, NodeId, G::Weight)| (graph.node_key(e.0), graph.node_key(e.1), e.2);
        by_weight_then_ends(&key(a), &key(b))
    });
    edges.dedup_by(|a, b| a.0 == b.0 && a.1 == b.1 && a.2 == b.2);
    edges
}

fn finish<G>(graph: &G, chosen: Vec<(NodeId, NodeId, G::Weight)>) -> MinimumSpanningTree<G::Key, G::Weight>
where
    G: GraphBase,
    G::Key: Ord,
{
    let mut total_weight = G::Weight::zero();
    let mut edges: Vec<(G::Key, G::Key, G::Weight)> = chosen
        .into_iter()
        .map(|(u, v, w)| {
            total_weight = total_weight + w;
            let (a, b) = (graph.node_key(u).clone(), graph.node_key(v).clone());
            if a <= b { (a, b, w) } else { (b, a, w) }
        })
        .collect();
    edges.sort_by(by_weight_then_ends);
    MinimumSpanningTree {
        edges: Some(edges),
        total_weight,
    }
}

fn disconnected<K, W: Weight>() -> MinimumSpanningTree<K, W> {
    MinimumSpanningTree {
        edges: None,
        total_weight: W::zero(),
    }
}

/// Kruskal's algorithm over the undirected view of the graph. Ties are broken by the smaller
/// endpoints.
pub fn kruskal_mst<G>(graph: &G) -> MinimumSpanningTree<G::Key, G::Weight>
where
    G: GraphBase + EdgeWeights,
    G::Key: Ord,
{
    let n = graph.order();
    let mut uf = UnionFind::new(n);
    let mut chosen = Vec::with_capacity(n.saturating_sub(1));
    for (u, v, w) in normalized_edges(graph) {
        if uf.union(u.0, v.0) {
            chosen.push((u, v, w));
            if chosen.len() + 1 == n {
                break;
            }
        }
    }
    if uf.sets > 1 {
        debug!("kruskal: {} components, no spanning tree", uf.sets);
        return disconnected();
    }
    debug!("kruskal: {} tree edge(s)", chosen.len());
    finish(graph, chosen)
}

/// Prim's algorithm grown from the first vertex with a binary heap of candidate edges.
pub fn prim_mst<G>(graph: &G) -> MinimumSpanningTree<G::Key, G::Weight>
where
    G: GraphBase + EdgeWeights,
    G::Key: Ord,
    G::Weight: Ord,
{
    let n = graph.order();
    if n == 0 {
        return finish(graph, Vec::new());
    }
    let mut adj: Vec<Vec<(NodeId, G::Weight)>> = vec![Vec::new(); n];
    for (u, v, w) in normalized_edges(graph) {
        adj[u.0].push((v, w));
        adj[v.0].push((u, w));
    }

    let mut in_tree = vec![false; n];
    let mut chosen = Vec::with_capacity(n - 1);
    let mut heap = BinaryHeap::new();
    in_tree[0] = true;
    for &(to, w) in &adj[0] {
        heap.push(Reverse((w, NodeId(0), to)));
    }
    while let Some(Reverse((w, from, to))) = heap.pop() {
        if in_tree[to.0] {
            continue;
        }
        in_tree[to.0] = true;
        chosen.push((from, to, w));
        for &(next, w) in &adj[to.0] {
            if !in_tree[next.0] {
                heap.push(Reverse((w, to, next)));
            }
        }
    }

    if chosen.len() + 1 < n {
        debug!("prim: reached {} of {} vertices", chosen.len() + 1, n);
        return disconnected();
    }
    finish(graph, chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{GraphFormat, parse_graph};

    const SQUARE: &str = "4\n0 1 3 0\n1 0 2 4\n3 2 0 5\n0 4 5 0\n";

    #[test]
    fn kruskal_picks_the_lightest_edges() {
        let g = parse_graph(SQUARE, GraphFormat::AdjacencyMatrix).unwrap();
        let mst = kruskal_mst(g.storage());
        assert_eq!(mst.edges, Some(vec![(1, 2, 1), (2, 3, 2), (2, 4, 4)]));
        assert_eq!(mst.total_weight, 7);
        assert_eq!(mst.to_report(), "Minimal spanning tree:\n1-2: 1\n2-3: 2\n2-4: 4");
    }

    #[test]
    fn prim_agrees_with_kruskal() {
        let g = parse_graph(SQUARE, GraphFormat::AdjacencyMatrix).unwrap();
        let prim = prim_mst(g.storage());
        assert_eq!(prim.edges, kruskal_mst(g.storage()).edges);
        assert_eq!(prim.total_weight, 7);
    }

    #[test]
    fn disconnected_graph_has_no_tree() {
        let g = parse_graph("4\n1 2 1\n2 1 1\n3 4 2\n4 3 2\n", GraphFormat::EdgeList).unwrap();
        assert_eq!(kruskal_mst(g.storage()).to_report(), "Graph is not connected");
        assert!(prim_mst(g.storage()).edges.is_none());
    }

    #[test]
    fn union_find_counts_sets() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.union(1, 0));
        assert!(uf.union(1, 3));
        assert_eq!(uf.sets, 1);
        assert_eq!(uf.find(2), uf.find(0));
    }
}
