use std::fmt::Display;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};
use crate::report::ReportDisplay;
use crate::{EdgeWeights, GraphBase, NodeId, Weight};

/// Ant colony tuning. `ants: None` means `max(10, n)`; `seed: None` draws from the OS.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntColonyParams {
    /// Pheromone influence.
    pub alpha: f64,
    /// Distance influence.
    pub beta: f64,
    /// Share of pheromone lost per iteration.
    pub evaporation: f64,
    /// Pheromone laid by an ant, divided by its tour length.
    pub deposit: f64,
    pub ants: Option<usize>,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for AntColonyParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 5.0,
            evaporation: 0.5,
            deposit: 100.0,
            ants: None,
            iterations: 200,
            seed: None,
        }
    }
}

pub struct TourResult<K, W> {
    pub length: W,
    /// Cities in visiting order; the tour returns to the first one.
    pub tour: Vec<K>,
    pub legs: Vec<(K, K, W)>,
}

impl<K: Display, W: Display> ReportDisplay for TourResult<K, W> {
    fn to_report(&self) -> String {
        let mut s = format!(
            "Length of shortest traveling salesman path is: {}.\nPath:",
            self.length
        );
        for (u, v, w) in &self.legs {
            s.push_str(&format!("\n{u}-{v} : {w}"));
        }
        s
    }
}

struct Colony<'a, W> {
    params: &'a AntColonyParams,
    dist: Vec<Vec<W>>,
    pheromone: Vec<Vec<f64>>,
}

impl<W: Weight> Colony<'_, W> {
    fn attractiveness(&self, from: usize, to: usize) -> f64 {
        let tau = self.pheromone[from][to].powf(self.params.alpha);
        let d = self.dist[from][to].as_f64();
        let eta = if d > 0.0 { (1.0 / d).powf(self.params.beta) } else { 0.0 };
        tau * eta
    }

    /// One ant's tour from a random city, picking each next city by roulette over the
    /// unvisited ones in ascending order.
    fn walk<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let n = self.dist.len();
        let mut current = rng.random_range(0..n);
        let mut tour = vec![current];
        let mut unvisited: Vec<usize> = (0..n).filter(|&c| c != current).collect();
        while let Some(&fallback) = unvisited.last() {
            let weights: Vec<f64> = unvisited
                .iter()
                .map(|&j| self.attractiveness(current, j))
                .collect();
            let total: f64 = weights.iter().sum();
            let r: f64 = rng.random();
            let mut acc = 0.0;
            let mut next = fallback;
            if total > 0.0 {
                for (&j, w) in unvisited.iter().zip(&weights) {
                    acc += w / total;
                    if r <= acc {
                        next = j;
                        break;
                    }
                }
            }
            unvisited.retain(|&c| c != next);
            tour.push(next);
            current = next;
        }
        tour
    }

    fn length(&self, tour: &[usize]) -> W {
        let n = tour.len();
        (0..n).fold(W::zero(), |acc, i| acc + self.dist[tour[i]][tour[(i + 1) % n]])
    }

    fn evaporate(&mut self) {
        let keep = 1.0 - self.params.evaporation;
        for row in &mut self.pheromone {
            for p in row {
                *p *= keep;
            }
        }
    }

    fn lay(&mut self, tour: &[usize], length: W) {
        let amount = self.params.deposit / length.as_f64();
        let n = tour.len();
        for i in 0..n {
            let (a, b) = (tour[i], tour[(i + 1) % n]);
            self.pheromone[a][b] += amount;
            self.pheromone[b][a] += amount;
        }
    }
}

/// Dense distance table; missing arcs read as zero.
fn distance_table<G>(graph: &G) -> Vec<Vec<G::Weight>>
where
    G: GraphBase + EdgeWeights,
{
    let n = graph.order();
    let mut dist = vec![vec![G::Weight::zero(); n]; n];
    for e in graph.edge_ids() {
        let (u, v) = graph.endpoints(e);
        dist[u.0][v.0] = graph.weight_of(e);
    }
    dist
}

/// Ant colony search for a short Hamiltonian cycle. Every ordered pair of distinct vertices
/// needs a non-zero weight.
pub fn ant_colony_tsp<G>(graph: &G, params: &AntColonyParams) -> Result<TourResult<G::Key, G::Weight>>
where
    G: GraphBase + EdgeWeights,
{
    let n = graph.order();
    if n == 0 {
        return Err(LabError::EmptyGraph);
    }
    let dist = distance_table(graph);
    for (i, row) in dist.iter().enumerate() {
        if let Some(j) = (0..n).find(|&j| j != i && row[j] == G::Weight::zero()) {
            return Err(LabError::IncompleteGraph { from: i + 1, to: j + 1 });
        }
    }

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let ants = params.ants.unwrap_or(n.max(10));
    let mut colony = Colony {
        params,
        dist,
        pheromone: vec![vec![1.0; n]; n],
    };

    let mut best: Option<(G::Weight, Vec<usize>)> = None;
    for iteration in 0..params.iterations {
        let walks: Vec<(Vec<usize>, G::Weight)> = (0..ants)
            .map(|_| {
                let tour = colony.walk(&mut rng);
                let length = colony.length(&tour);
                (tour, length)
            })
            .collect();
        for (tour, length) in &walks {
            if best.as_ref().is_none_or(|(l, _)| length < l) {
                debug!("ant colony: iteration {iteration} found length {length}");
                best = Some((*length, tour.clone()));
            }
        }
        colony.evaporate();
        for (tour, length) in &walks {
            colony.lay(tour, *length);
        }
    }

    let (length, tour) = match best {
        Some(found) => found,
        None => {
            let tour: Vec<usize> = (0..n).collect();
            (colony.length(&tour), tour)
        }
    };
    let key = |i: usize| graph.node_key(NodeId(i)).clone();
    let legs = (0..n)
        .map(|i| {
            let (a, b) = (tour[i], tour[(i + 1) % n]);
            (key(a), key(b), colony.dist[a][b])
        })
        .collect();
    Ok(TourResult {
        length,
        tour: tour.iter().map(|&i| key(i)).collect(),
        legs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{GraphFormat, parse_graph};

    const SQUARE: &str = "4\n0 1 10 1\n1 0 1 10\n10 1 0 1\n1 10 1 0\n";

    fn seeded() -> AntColonyParams {
        AntColonyParams {
            seed: Some(7),
            iterations: 30,
            ..AntColonyParams::default()
        }
    }

    #[test]
    fn finds_the_perimeter_of_a_square() {
        let g = parse_graph(SQUARE, GraphFormat::AdjacencyMatrix).unwrap();
        let result = ant_colony_tsp(g.storage(), &seeded()).unwrap();
        assert_eq!(result.length, 4);
        assert_eq!(result.legs.len(), 4);
        assert!(result.legs.iter().all(|&(_, _, w)| w == 1));
        assert!(
            result
                .to_report()
                .starts_with("Length of shortest traveling salesman path is: 4.\nPath:\n")
        );
    }

    #[test]
    fn same_seed_same_tour() {
        let g = parse_graph(SQUARE, GraphFormat::AdjacencyMatrix).unwrap();
        let a = ant_colony_tsp(g.storage(), &seeded()).unwrap();
        let b = ant_colony_tsp(g.storage(), &seeded()).unwrap();
        assert_eq!(a.tour, b.tour);
    }

    #[test]
    fn incomplete_graph_is_rejected() {
        let g = parse_graph("3\n0 1 1\n1 0 0\n1 0 0\n", GraphFormat::AdjacencyMatrix).unwrap();
        assert!(matches!(
            ant_colony_tsp(g.storage(), &seeded()),
            Err(LabError::IncompleteGraph { from: 2, to: 3 })
        ));
    }

    #[test]
    fn single_city() {
        let g = parse_graph("1\n0\n", GraphFormat::AdjacencyMatrix).unwrap();
        let result = ant_colony_tsp(g.storage(), &seeded()).unwrap();
        assert_eq!(
            result.to_report(),
            "Length of shortest traveling salesman path is: 0.\nPath:\n1-1 : 0"
        );
    }
}
