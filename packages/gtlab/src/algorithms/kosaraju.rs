use std::fmt::Display;

use log::debug;

use crate::report::{ReportDisplay, list};
use crate::{GraphBase, NodeId};

pub struct StrongComponents<K> {
    pub strongly_connected: bool,
    /// Each component sorted. Components with several vertices come first by smallest vertex,
    /// then single vertices from the largest down.
    pub components: Vec<Vec<K>>,
}

impl<K: Display> ReportDisplay for StrongComponents<K> {
    fn to_report(&self) -> String {
        let mut s = format!(
            "Digraph is {}strongly connected\n\nStrongly connected components:",
            if self.strongly_connected { "" } else { "not " }
        );
        for component in &self.components {
            s.push('\n');
            s.push_str(&list(component));
        }
        s
    }
}

fn reaches_all<G, F, I>(graph: &G, start: NodeId, next: F) -> bool
where
    G: GraphBase,
    F: Fn(NodeId) -> I,
    I: Iterator<Item = NodeId>,
{
    let mut visited = vec![false; graph.order()];
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        if visited[v.0] {
            continue;
        }
        visited[v.0] = true;
        stack.extend(next(v).filter(|u| !visited[u.0]));
    }
    visited.iter().all(|&seen| seen)
}

/// Every vertex reachable from the first one, both along arcs and against them.
pub fn is_strongly_connected<G: GraphBase>(graph: &G) -> bool {
    if graph.order() == 0 {
        return true;
    }
    reaches_all(graph, NodeId(0), |v| graph.successors(v))
        && reaches_all(graph, NodeId(0), |v| graph.predecessors(v))
}

/// Finish order of an iterative depth-first search that visits successors in storage order.
fn finish_order<G: GraphBase>(graph: &G) -> Vec<NodeId> {
    let n = graph.order();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for root in graph.node_ids() {
        if visited[root.0] {
            continue;
        }
        let mut stack = vec![(root, false)];
        while let Some((v, done)) = stack.pop() {
            if done {
                order.push(v);
                continue;
            }
            if visited[v.0] {
                continue;
            }
            visited[v.0] = true;
            stack.push((v, true));
            let next: Vec<NodeId> = graph.successors(v).filter(|u| !visited[u.0]).collect();
            stack.extend(next.into_iter().rev().map(|u| (u, false)));
        }
    }
    order
}

/// Kosaraju's two-pass algorithm: finish order on the graph, then collection on the transpose
/// in reverse finish order.
pub fn kosaraju<G>(graph: &G) -> Vec<Vec<NodeId>>
where
    G: GraphBase,
{
    let order = finish_order(graph);
    let mut visited = vec![false; graph.order()];
    let mut components = Vec::new();
    for &root in order.iter().rev() {
        if visited[root.0] {
            continue;
        }
        let mut component = Vec::new();
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            if visited[v.0] {
                continue;
            }
            visited[v.0] = true;
            component.push(v);
            stack.extend(graph.predecessors(v).filter(|u| !visited[u.0]));
        }
        components.push(component);
    }
    components
}

pub fn strong_components<G>(graph: &G) -> StrongComponents<G::Key>
where
    G: GraphBase,
    G::Key: Ord,
{
    if is_strongly_connected(graph) {
        let all: Vec<NodeId> = graph.node_ids().collect();
        return StrongComponents {
            strongly_connected: true,
            components: vec![crate::algorithms::traversal::sorted_keys(graph, &all)],
        };
    }

    let mut components: Vec<Vec<G::Key>> = kosaraju(graph)
        .iter()
        .map(|c| crate::algorithms::traversal::sorted_keys(graph, c))
        .collect();
    components.sort_by(|a, b| match (a.len() > 1, b.len() > 1) {
        (true, true) => a[0].cmp(&b[0]),
        (false, false) => b[0].cmp(&a[0]),
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
    });
    debug!("kosaraju: {} component(s)", components.len());
    StrongComponents {
        strongly_connected: false,
        components,
    }
}
