use log::debug;

use crate::algorithms::bipartite::two_coloring;
use crate::report::{ReportDisplay, pair_list};
use crate::{GraphBase, NodeId};

/// Maximum matching as zero-based vertex index pairs `(left, right)`, sorted; the left side is
/// the colour class of each component's first vertex.
pub struct MatchingResult {
    pub pairs: Option<Vec<(usize, usize)>>,
}

impl MatchingResult {
    pub fn size(&self) -> usize {
        self.pairs.as_ref().map_or(0, Vec::len)
    }
}

impl ReportDisplay for MatchingResult {
    fn to_report(&self) -> String {
        match &self.pairs {
            Some(pairs) => format!(
                "Maximum matching number: {}.\nMatching maximum size:\n\t{}.",
                pairs.len(),
                pair_list(pairs)
            ),
            None => "Graph is not bipartite.".to_string(),
        }
    }
}

struct Kuhn {
    adj: Vec<Vec<usize>>,
    match_left: Vec<Option<usize>>,
    match_right: Vec<Option<usize>>,
}

impl Kuhn {
    /// Augmenting path search from left vertex `root`, iterative with an explicit stack of
    /// `(left vertex, next neighbour position)`.
    fn augment(&mut self, root: usize, visited: &mut [bool]) -> bool {
        visited[root] = true;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        // Right vertex taken at each stack level, to flip the path once a free one is found.
        let mut via: Vec<usize> = Vec::new();
        while let Some(top) = stack.last_mut() {
            let Some(&r) = self.adj[top.0].get(top.1) else {
                stack.pop();
                via.pop();
                continue;
            };
            top.1 += 1;
            match self.match_right[r] {
                None => {
                    via.push(r);
                    for (&(l, _), &r) in stack.iter().zip(&via) {
                        self.match_left[l] = Some(r);
                        self.match_right[r] = Some(l);
                    }
                    return true;
                }
                Some(next) if !visited[next] => {
                    visited[next] = true;
                    via.push(r);
                    stack.push((next, 0));
                }
                Some(_) => {}
            }
        }
        false
    }
}

/// Kuhn's algorithm over the two-colouring of the graph. Neighbour lists are scanned in
/// ascending index order.
pub fn maximum_matching<G>(graph: &G) -> MatchingResult
where
    G: GraphBase,
{
    let Some(color) = two_coloring(graph) else {
        return MatchingResult { pairs: None };
    };
    let left: Vec<usize> = (0..color.len()).filter(|&v| color[v] == 0).collect();
    let right: Vec<usize> = (0..color.len()).filter(|&v| color[v] == 1).collect();
    let mut right_index = vec![None; color.len()];
    for (i, &v) in right.iter().enumerate() {
        right_index[v] = Some(i);
    }

    let adj: Vec<Vec<usize>> = left
        .iter()
        .map(|&v| {
            let mut next: Vec<usize> = graph
                .successors(NodeId(v))
                .filter_map(|u| right_index[u.0])
                .collect();
            next.sort_unstable();
            next
        })
        .collect();

    let mut kuhn = Kuhn {
        adj,
        match_left: vec![None; left.len()],
        match_right: vec![None; right.len()],
    };
    for l in 0..left.len() {
        let mut visited = vec![false; left.len()];
        kuhn.augment(l, &mut visited);
    }

    let mut pairs: Vec<(usize, usize)> = kuhn
        .match_left
        .iter()
        .enumerate()
        .filter_map(|(l, r)| r.map(|r| (left[l], right[r])))
        .collect();
    pairs.sort_unstable();
    debug!("matching: {} pair(s)", pairs.len());
    MatchingResult { pairs: Some(pairs) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{GraphFormat, parse_graph};

    #[test]
    fn augmenting_path_reassigns_partners() {
        // Left {1, 2}, right {3, 4}; 1 likes 3 and 4, 2 likes only 3.
        let g = parse_graph("4\n3 4\n3\n1 2\n1\n", GraphFormat::AdjacencyList).unwrap();
        let result = maximum_matching(g.storage());
        assert_eq!(result.size(), 2);
        assert_eq!(result.pairs, Some(vec![(0, 3), (1, 2)]));
        assert_eq!(
            result.to_report(),
            "Maximum matching number: 2.\nMatching maximum size:\n\t[(0, 3), (1, 2)]."
        );
    }

    #[test]
    fn star_matches_once() {
        let g = parse_graph("4\n2 3 4\n1\n1\n1\n", GraphFormat::AdjacencyList).unwrap();
        assert_eq!(maximum_matching(g.storage()).pairs, Some(vec![(0, 1)]));
    }

    #[test]
    fn triangle_has_no_matching() {
        let g = parse_graph("3\n2 3\n1 3\n1 2\n", GraphFormat::AdjacencyList).unwrap();
        assert_eq!(maximum_matching(g.storage()).to_report(), "Graph is not bipartite.");
    }
}
