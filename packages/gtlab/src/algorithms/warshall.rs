use std::fmt::{self, Display};

use log::debug;

use crate::algorithms::traversal::weak_components;
use crate::report::{ReportDisplay, float, list};
use crate::{EdgeWeights, GraphBase, NodeId, Weight};

/// All-pairs shortest distances with a next-hop matrix for path reconstruction.
/// `None` marks an unreachable pair.
pub struct ShortestPaths<K, W> {
    pub nodes: Vec<K>,
    pub dist: Vec<Vec<Option<W>>>,
    pub next: Vec<Vec<Option<NodeId>>>,
}

impl<K: Clone, W: Weight> ShortestPaths<K, W> {
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<W> {
        self.dist[from.0][to.0]
    }

    /// Vertices of a shortest `from -> to` path, both ends included.
    pub fn path(&self, from: NodeId, to: NodeId) -> Option<Vec<K>> {
        self.next[from.0][to.0]?;
        let mut path = vec![self.nodes[from.0].clone()];
        let mut u = from;
        while u != to {
            u = self.next[u.0][to.0]?;
            path.push(self.nodes[u.0].clone());
        }
        Some(path)
    }
}

/// Floyd–Warshall. With `unit_weights` every arc counts as length one. Self-loops never
/// shorten the zero diagonal.
pub fn floyd_warshall<G>(graph: &G, unit_weights: bool) -> ShortestPaths<G::Key, G::Weight>
where
    G: GraphBase + EdgeWeights,
{
    let n = graph.order();
    let mut dist: Vec<Vec<Option<G::Weight>>> = vec![vec![None; n]; n];
    let mut next: Vec<Vec<Option<NodeId>>> = vec![vec![None; n]; n];

    for e in graph.edge_ids() {
        let (u, v) = graph.endpoints(e);
        let w = if unit_weights {
            G::Weight::one()
        } else {
            graph.weight_of(e)
        };
        dist[u.0][v.0] = Some(w);
        next[u.0][v.0] = Some(v);
    }
    for i in 0..n {
        dist[i][i] = Some(G::Weight::zero());
        next[i][i] = Some(NodeId(i));
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i][k] else { continue };
            for j in 0..n {
                let Some(kj) = dist[k][j] else { continue };
                let through = ik + kj;
                if dist[i][j].is_none_or(|d| through < d) {
                    dist[i][j] = Some(through);
                    next[i][j] = next[i][k];
                }
            }
        }
    }

    ShortestPaths {
        nodes: graph.node_ids().map(|v| graph.node_key(v).clone()).collect(),
        dist,
        next,
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Eccentricity<W> {
    Finite(W),
    Infinite,
}

impl<W: Display> Display for Eccentricity<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eccentricity::Finite(w) => write!(f, "{w}"),
            Eccentricity::Infinite => f.write_str("+Infinity"),
        }
    }
}

/// Degrees, eccentricities, radius, diameter, centre and periphery of an unweighted graph.
pub struct GraphDistances<K, W> {
    pub degrees: Vec<usize>,
    pub eccentricities: Vec<Eccentricity<W>>,
    pub radius: Eccentricity<W>,
    pub diameter: Eccentricity<W>,
    pub central: Vec<K>,
    pub peripheral: Vec<K>,
}

impl<K: Display, W: Display> ReportDisplay for GraphDistances<K, W> {
    fn to_report(&self) -> String {
        [
            "Vertices degrees:".to_string(),
            list(&self.degrees),
            "Eccentricity:".to_string(),
            list(&self.eccentricities),
            format!("R = {}", self.radius),
            "Central vertices:".to_string(),
            list(&self.central),
            format!("D = {}", self.diameter),
            "Peripherial vertices:".to_string(),
            list(&self.peripheral),
        ]
        .join("\n")
    }
}

/// Unit-weight distances. A vertex that cannot reach every other vertex has infinite
/// eccentricity; when any vertex does, radius and diameter are infinite and every vertex is
/// both central and peripheral.
pub fn graph_distances<G>(graph: &G) -> GraphDistances<G::Key, G::Weight>
where
    G: GraphBase + EdgeWeights,
{
    let paths = floyd_warshall(graph, true);
    let degrees: Vec<usize> = graph.node_ids().map(|v| graph.out_degree(v)).collect();
    let eccentricities: Vec<Eccentricity<G::Weight>> = paths
        .dist
        .iter()
        .map(|row| {
            row.iter()
                .try_fold(G::Weight::zero(), |max, d| match d {
                    Some(d) if *d > max => Some(*d),
                    Some(_) => Some(max),
                    None => None,
                })
                .map_or(Eccentricity::Infinite, Eccentricity::Finite)
        })
        .collect();

    let finite: Option<Vec<G::Weight>> = eccentricities
        .iter()
        .map(|e| match e {
            Eccentricity::Finite(w) => Some(*w),
            Eccentricity::Infinite => None,
        })
        .collect();

    let result = match finite {
        Some(values) => {
            let radius = values
                .iter()
                .copied()
                .reduce(|a, b| if b < a { b } else { a })
                .unwrap_or(G::Weight::zero());
            let diameter = values
                .iter()
                .copied()
                .reduce(|a, b| if b > a { b } else { a })
                .unwrap_or(G::Weight::zero());
            let pick = |target: G::Weight| {
                values
                    .iter()
                    .zip(&paths.nodes)
                    .filter(|(e, _)| **e == target)
                    .map(|(_, k)| k.clone())
                    .collect()
            };
            GraphDistances {
                central: pick(radius),
                peripheral: pick(diameter),
                radius: Eccentricity::Finite(radius),
                diameter: Eccentricity::Finite(diameter),
                degrees,
                eccentricities,
            }
        }
        None => GraphDistances {
            central: paths.nodes.clone(),
            peripheral: paths.nodes.clone(),
            radius: Eccentricity::Infinite,
            diameter: Eccentricity::Infinite,
            degrees,
            eccentricities,
        },
    };
    debug!("distances: R = {}, D = {}", result.radius, result.diameter);
    result
}

/// Distance summary of one weakly connected component, weights as floats.
pub struct ComponentDistances<K> {
    pub vertices: Vec<K>,
    pub degrees: Vec<usize>,
    /// Largest finite distance from each vertex to the rest of its component.
    pub eccentricities: Vec<f64>,
    pub radius: f64,
    pub diameter: f64,
    pub central: Vec<K>,
    pub peripheral: Vec<K>,
}

pub struct ComponentDistancesResult<K> {
    pub components: Vec<ComponentDistances<K>>,
}

impl<K: Display> ReportDisplay for ComponentDistancesResult<K> {
    fn to_report(&self) -> String {
        let several = self.components.len() > 1;
        self.components
            .iter()
            .map(|c| {
                let mut lines = Vec::new();
                if several {
                    lines.push("Vertices list in component:".to_string());
                    lines.push(list(&c.vertices));
                }
                lines.extend([
                    "Vertices degrees:".to_string(),
                    list(&c.degrees),
                    "Eccentricity:".to_string(),
                    list(c.eccentricities.iter().map(|e| float(*e))),
                    format!("R = {}", float(c.radius)),
                    "Central vertices:".to_string(),
                    list(&c.central),
                    format!("D = {}", float(c.diameter)),
                    "Peripherial vertices:".to_string(),
                    list(&c.peripheral),
                ]);
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n\n")
    }
}

/// Weighted Floyd–Warshall summarised per weakly connected component. Components are listed
/// by their smallest vertex id.
pub fn component_distances<G>(graph: &G) -> ComponentDistancesResult<G::Key>
where
    G: GraphBase + EdgeWeights,
{
    let paths = floyd_warshall(graph, false);
    let mut components = weak_components(graph);
    for c in components.iter_mut() {
        c.sort();
    }
    components.sort_by_key(|c| c.first().copied());

    let summaries = components
        .iter()
        .map(|comp| {
            let eccentricities: Vec<f64> = comp
                .iter()
                .map(|&i| {
                    comp.iter()
                        .filter_map(|&j| paths.distance(i, j))
                        .map(Weight::as_f64)
                        .fold(f64::NEG_INFINITY, f64::max)
                })
                .collect();
            let radius = eccentricities.iter().copied().fold(f64::INFINITY, f64::min);
            let diameter = eccentricities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let key = |v: NodeId| graph.node_key(v).clone();
            let pick = |target: f64| {
                comp.iter()
                    .zip(&eccentricities)
                    .filter(|(_, e)| **e == target)
                    .map(|(&v, _)| key(v))
                    .collect()
            };
            ComponentDistances {
                vertices: comp.iter().map(|&v| key(v)).collect(),
                degrees: comp.iter().map(|&v| graph.out_degree(v)).collect(),
                central: pick(radius),
                peripheral: pick(diameter),
                eccentricities,
                radius,
                diameter,
            }
        })
        .collect();

    ComponentDistancesResult {
        components: summaries,
    }
}
