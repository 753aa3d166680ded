//! Graph file loaders.
//!
//! Every format starts with the vertex count `n` on the first non-blank line; vertices are
//! `1..=n`. Blank lines are skipped everywhere, so in the adjacency-list format the `i`-th
//! non-blank line after the header lists the successors of vertex `i`.

use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{LabError, ParseError, Result};
use crate::storage::{AdjacencyList, GraphDefinition};
use crate::traits::{GraphBase, MutableStorage, StorageRepresentation};
use crate::wrappers::{DirectedGraph, Graph, UndirectedGraph};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    /// `u v` or `u v w` per line.
    EdgeList,
    /// Line `i` holds `v` or `v:w` tokens.
    AdjacencyList,
    /// `n` rows of `n` integers, non-zero means an arc of that weight.
    AdjacencyMatrix,
}

/// Storage every loaded lab graph uses: vertex keys `1..=n`, integer weights.
pub type LabStorage = AdjacencyList<usize, i64>;

#[derive(Clone, Debug)]
pub enum LoadedGraph {
    Directed(DirectedGraph<LabStorage>),
    Undirected(UndirectedGraph<LabStorage>),
}

impl LoadedGraph {
    pub fn is_directed(&self) -> bool {
        matches!(self, LoadedGraph::Directed(_))
    }

    pub fn storage(&self) -> &LabStorage {
        match self {
            LoadedGraph::Directed(g) => g.storage(),
            LoadedGraph::Undirected(g) => g.storage(),
        }
    }

    pub fn order(&self) -> usize {
        self.storage().order()
    }

    /// The arcs as a digraph; an undirected edge shows up as a 2-cycle.
    pub fn as_directed(&self) -> DirectedGraph<LabStorage> {
        match self {
            LoadedGraph::Directed(g) => g.clone(),
            LoadedGraph::Undirected(g) => g.clone().into_directed(),
        }
    }
}

/// A non-blank line with its 1-based position in the file.
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

pub(crate) fn non_blank_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, l)| Line {
            number: i + 1,
            text: l.trim(),
        })
        .filter(|l| !l.text.is_empty())
        .collect()
}

pub(crate) fn parse_int(token: &str, line: usize) -> std::result::Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::NotAnInteger {
        line,
        token: token.to_string(),
    })
}

pub(crate) fn parse_row(line: &Line<'_>) -> std::result::Result<Vec<i64>, ParseError> {
    line.text
        .split_whitespace()
        .map(|t| parse_int(t, line.number))
        .collect()
}

fn vertex(value: i64, order: usize) -> Result<usize> {
    if value >= 1 && (value as usize) <= order {
        Ok(value as usize)
    } else {
        Err(LabError::InvalidVertex {
            vertex: value,
            order,
        })
    }
}

type ArcMap = IndexMap<(usize, usize), i64>;

fn edge_list_arcs(lines: &[Line<'_>], order: usize, arcs: &mut ArcMap) -> Result<()> {
    for line in lines {
        let row = parse_row(line)?;
        let (u, v, w) = match row[..] {
            [u, v] => (u, v, 1),
            [u, v, w] => (u, v, w),
            _ => {
                return Err(ParseError::Malformed {
                    line: line.number,
                    expected: "`u v` or `u v w`",
                    found: line.text.to_string(),
                }
                .into());
            }
        };
        arcs.insert((vertex(u, order)?, vertex(v, order)?), w);
    }
    Ok(())
}

fn adjacency_list_arcs(lines: &[Line<'_>], order: usize, arcs: &mut ArcMap) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        let u = vertex(i as i64 + 1, order)?;
        for token in line.text.split_whitespace() {
            let (v, w) = match token.split_once(':') {
                Some((v, w)) => (parse_int(v, line.number)?, parse_int(w, line.number)?),
                None => (parse_int(token, line.number)?, 1),
            };
            arcs.insert((u, vertex(v, order)?), w);
        }
    }
    Ok(())
}

fn adjacency_matrix_arcs(lines: &[Line<'_>], order: usize, arcs: &mut ArcMap) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        let u = vertex(i as i64 + 1, order)?;
        let row = parse_row(line)?;
        if row.len() != order {
            return Err(ParseError::RaggedRow {
                line: line.number,
                expected: order,
                found: row.len(),
            }
            .into());
        }
        for (j, w) in row.into_iter().enumerate() {
            if w != 0 {
                arcs.insert((u, j + 1), w);
            }
        }
    }
    Ok(())
}

/// Parse graph text. The graph is undirected exactly when every arc `u -> v` of weight `w`
/// has the reverse arc with the same weight.
pub fn parse_graph(text: &str, format: GraphFormat) -> Result<LoadedGraph> {
    let lines = non_blank_lines(text);
    let (header, body) = lines.split_first().ok_or(ParseError::Empty)?;
    let order = match parse_row(header)?[..] {
        [n] if n >= 0 => n as usize,
        _ => {
            return Err(ParseError::Malformed {
                line: header.number,
                expected: "vertex count",
                found: header.text.to_string(),
            }
            .into());
        }
    };

    let mut arcs = ArcMap::new();
    match format {
        GraphFormat::EdgeList => edge_list_arcs(body, order, &mut arcs)?,
        GraphFormat::AdjacencyList => adjacency_list_arcs(body, order, &mut arcs)?,
        GraphFormat::AdjacencyMatrix => adjacency_matrix_arcs(body, order, &mut arcs)?,
    }

    let mut def: GraphDefinition<usize, i64> = GraphDefinition::with_node_capacity(order);
    for v in 1..=order {
        def.add_node(v);
    }
    for ((u, v), w) in arcs {
        def.add_arc_by_key(u, v, w);
    }
    let directed = !def.is_symmetric();
    debug!(
        "loaded {} graph: {} vertices, {} arcs",
        if directed { "directed" } else { "undirected" },
        def.order(),
        def.size()
    );

    let storage = LabStorage::from(def);
    Ok(if directed {
        LoadedGraph::Directed(DirectedGraph::new(storage))
    } else {
        LoadedGraph::Undirected(UndirectedGraph::new(storage))
    })
}

pub fn load_graph(path: impl AsRef<Path>, format: GraphFormat) -> Result<LoadedGraph> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| LabError::io(path, e))?;
    parse_graph(&text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeId;
    use crate::traits::EdgeWeights;

    fn successors(g: &LoadedGraph, v: usize) -> Vec<usize> {
        let s = g.storage();
        s.successors(NodeId(v - 1)).map(|x| *s.node_key(x)).collect()
    }

    #[test]
    fn edge_list_detects_orientation() {
        let g = parse_graph("3\n1 2\n2 1\n2 3\n3 2\n", GraphFormat::EdgeList).unwrap();
        assert!(!g.is_directed());
        assert_eq!(successors(&g, 2), vec![1, 3]);

        let g = parse_graph("3\n1 2\n2 3\n", GraphFormat::EdgeList).unwrap();
        assert!(g.is_directed());
    }

    #[test]
    fn differing_weights_make_a_digraph() {
        let g = parse_graph("2\n1 2 5\n2 1 6\n", GraphFormat::EdgeList).unwrap();
        assert!(g.is_directed());
    }

    #[test]
    fn adjacency_list_reads_weights_and_skips_blank_lines() {
        let g = parse_graph("3\n\n2:4 3\n\n1:4\n1\n", GraphFormat::AdjacencyList).unwrap();
        assert!(!g.is_directed());
        assert_eq!(successors(&g, 1), vec![2, 3]);
        let s = g.storage();
        let e = s.edges_between(NodeId(0), NodeId(1)).next().unwrap();
        assert_eq!(s.weight_of(e), 4);
    }

    #[test]
    fn matrix_keeps_isolated_vertices() {
        let g = parse_graph("3\n0 7 0\n7 0 0\n0 0 0\n", GraphFormat::AdjacencyMatrix).unwrap();
        assert_eq!(g.order(), 3);
        assert!(!g.is_directed());
        assert!(successors(&g, 3).is_empty());
    }

    #[test]
    fn repeated_arc_keeps_last_weight() {
        let g = parse_graph("2\n1 2 3\n1 2 8\n", GraphFormat::EdgeList).unwrap();
        assert_eq!(g.storage().size(), 1);
        assert_eq!(g.storage().weight_of(crate::core::EdgeId(0)), 8);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            parse_graph("", GraphFormat::EdgeList),
            Err(LabError::Parse(ParseError::Empty))
        ));
        assert!(matches!(
            parse_graph("2\n1 x\n", GraphFormat::EdgeList),
            Err(LabError::Parse(ParseError::NotAnInteger { line: 2, .. }))
        ));
        assert!(matches!(
            parse_graph("2\n1 3\n", GraphFormat::EdgeList),
            Err(LabError::InvalidVertex { vertex: 3, order: 2 })
        ));
        assert!(matches!(
            parse_graph("2\n0 1\n1\n", GraphFormat::AdjacencyMatrix),
            Err(LabError::Parse(ParseError::RaggedRow { line: 3, .. }))
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_graph("/nonexistent/graph.txt", GraphFormat::EdgeList).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/graph.txt"));
    }
}
