use std::collections::VecDeque;
use std::fmt::Display;

use crate::report::{ReportDisplay, set};
use crate::{GraphBase, NodeId};

/// BFS two-colouring over successors. Every component's first vertex gets side `0`.
/// Returns `None` as soon as an arc joins two vertices of the same side.
pub fn two_coloring<G>(graph: &G) -> Option<Vec<u8>>
where
    G: GraphBase,
{
    let n = graph.order();
    let mut color: Vec<Option<u8>> = vec![None; n];
    let mut queue = VecDeque::new();
    for start in graph.node_ids() {
        if color[start.0].is_some() {
            continue;
        }
        color[start.0] = Some(0);
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            let side = color[v.0]?;
            for u in graph.successors(v) {
                match color[u.0] {
                    None => {
                        color[u.0] = Some(1 - side);
                        queue.push_back(u);
                    }
                    Some(c) if c == side => return None,
                    Some(_) => {}
                }
            }
        }
    }
    color.into_iter().collect()
}

pub struct Bipartition<K> {
    /// Both sides sorted, or `None` when the graph is not bipartite.
    pub sides: Option<(Vec<K>, Vec<K>)>,
}

impl<K: Display> ReportDisplay for Bipartition<K> {
    fn to_report(&self) -> String {
        match &self.sides {
            Some((first, second)) => format!(
                "First set:\n\t{},\nSecond set:\n\t{}.",
                set(first),
                set(second)
            ),
            None => "Graph is not bipartite.".to_string(),
        }
    }
}

pub fn bipartition<G>(graph: &G) -> Bipartition<G::Key>
where
    G: GraphBase,
    G::Key: Ord,
{
    let sides = two_coloring(graph).map(|color| {
        let side = |s: u8| {
            let ids: Vec<NodeId> = graph.node_ids().filter(|v| color[v.0] == s).collect();
            crate::algorithms::traversal::sorted_keys(graph, &ids)
        };
        (side(0), side(1))
    });
    Bipartition { sides }
}
