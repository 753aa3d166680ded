use std::fmt::Display;

use log::debug;

use crate::report::ReportDisplay;
use crate::{EdgeWeights, GraphBase, NodeId, Weight};

pub struct BellmanFordResult<K, W> {
    pub source: K,
    nodes: Vec<K>,
    /// `None` when a negative cycle is reachable from the source.
    pub dist: Option<Vec<Option<W>>>,
    parent: Vec<Option<NodeId>>,
}

impl<K: Clone, W: Copy> BellmanFordResult<K, W> {
    pub fn has_negative_cycle(&self) -> bool {
        self.dist.is_none()
    }

    pub fn distance(&self, to: NodeId) -> Option<W> {
        self.dist.as_ref()?.get(to.0).copied().flatten()
    }

    /// Vertices from the source to `to` following the parent links.
    pub fn path(&self, to: NodeId) -> Option<Vec<K>> {
        self.distance(to)?;
        let mut path = vec![self.nodes[to.0].clone()];
        let mut v = to;
        while let Some(p) = self.parent[v.0] {
            path.push(self.nodes[p.0].clone());
            v = p;
        }
        path.reverse();
        Some(path)
    }
}

impl<K: Display, W: Display> ReportDisplay for BellmanFordResult<K, W> {
    fn to_report(&self) -> String {
        let Some(dist) = &self.dist else {
            return "Graph contains negative cycle".to_string();
        };
        let entries: Vec<String> = self
            .nodes
            .iter()
            .zip(dist)
            .map(|(k, d)| match d {
                Some(d) => format!("{k}: {d}"),
                None => format!("{k}: 'inf'"),
            })
            .collect();
        format!(
            "Shotest paths lengths from {}:\n{{{}}}",
            self.source,
            entries.join(", ")
        )
    }
}

/// `n - 1` rounds of relaxation over every arc, then one more pass to detect a negative cycle.
pub fn bellman_ford<G>(graph: &G, source: NodeId) -> BellmanFordResult<G::Key, G::Weight>
where
    G: GraphBase + EdgeWeights,
{
    let n = graph.order();
    let arcs: Vec<(NodeId, NodeId, G::Weight)> = graph
        .edge_ids()
        .map(|e| {
            let (u, v) = graph.endpoints(e);
            (u, v, graph.weight_of(e))
        })
        .collect();

    let mut dist: Vec<Option<G::Weight>> = vec![None; n];
    let mut parent: Vec<Option<NodeId>> = vec![None; n];
    dist[source.0] = Some(G::Weight::zero());

    let relax = |dist: &mut Vec<Option<G::Weight>>, parent: &mut Vec<Option<NodeId>>| {
        let mut changed = false;
        for &(u, v, w) in &arcs {
            let Some(du) = dist[u.0] else { continue };
            let candidate = du + w;
            if dist[v.0].is_none_or(|dv| candidate < dv) {
                dist[v.0] = Some(candidate);
                parent[v.0] = Some(u);
                changed = true;
            }
        }
        changed
    };

    let mut rounds = 0;
    for _ in 1..n {
        rounds += 1;
        if !relax(&mut dist, &mut parent) {
            break;
        }
    }
    let negative_cycle = arcs.iter().any(|&(u, v, w)| match (dist[u.0], dist[v.0]) {
        (Some(du), Some(dv)) => du + w < dv,
        _ => false,
    });
    debug!("bellman-ford: {rounds} round(s), negative cycle: {negative_cycle}");

    BellmanFordResult {
        source: graph.node_key(source).clone(),
        nodes: graph.node_ids().map(|v| graph.node_key(v).clone()).collect(),
        dist: (!negative_cycle).then_some(dist),
        parent,
    }
}
