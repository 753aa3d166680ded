//! The fifteen labs as one dispatch table from input to report text.

use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithms::{
    AntColonyParams, BridgeOrder, FlowNetwork, Heuristic, MapRoute, MazeRoute, MstMethod,
    Traversal, a_star, ant_colony_tsp, bellman_ford, bipartition, bridges_and_cut_vertices,
    component_distances, connectivity, ford_fulkerson, graph_distances, kruskal_mst,
    maximum_matching, maze_shortest_path, prim_mst, spanning_tree, strong_components,
};
use crate::error::{LabError, Result};
use crate::io::{GraphFormat, LoadedGraph, load_graph};
use crate::map::{Cell, HeightMap};
use crate::report::ReportDisplay;
use crate::traits::GraphBase;

pub const UNDIRECTED_ONLY: &str = "This task is only for undirected graphs.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Connectivity,
    BridgesAndCutVertices,
    SpanningTree,
    Distances,
    Bipartite,
    Maze,
    StrongComponents,
    Bridges,
    MinimumSpanningTree,
    ComponentDistances,
    BellmanFord,
    MapPath,
    Matching,
    MaxFlow,
    Salesman,
}

impl Task {
    pub const ALL: [Task; 15] = [
        Task::Connectivity,
        Task::BridgesAndCutVertices,
        Task::SpanningTree,
        Task::Distances,
        Task::Bipartite,
        Task::Maze,
        Task::StrongComponents,
        Task::Bridges,
        Task::MinimumSpanningTree,
        Task::ComponentDistances,
        Task::BellmanFord,
        Task::MapPath,
        Task::Matching,
        Task::MaxFlow,
        Task::Salesman,
    ];

    /// Lab number, 1 to 15.
    pub fn number(self) -> usize {
        Task::ALL.iter().position(|&t| t == self).map_or(0, |i| i + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Task::Connectivity => "connectivity",
            Task::BridgesAndCutVertices => "bridges_and_cut_vertices",
            Task::SpanningTree => "spanning_tree",
            Task::Distances => "distances",
            Task::Bipartite => "bipartite",
            Task::Maze => "maze",
            Task::StrongComponents => "strong_components",
            Task::Bridges => "bridges",
            Task::MinimumSpanningTree => "minimum_spanning_tree",
            Task::ComponentDistances => "component_distances",
            Task::BellmanFord => "bellman_ford",
            Task::MapPath => "map_path",
            Task::Matching => "matching",
            Task::MaxFlow => "max_flow",
            Task::Salesman => "salesman",
        }
    }

    /// Tasks that read a height map instead of a graph file.
    pub fn uses_map(self) -> bool {
        matches!(self, Task::Maze | Task::MapPath)
    }

    /// Load the input file and produce the report.
    pub fn run(self, input: &TaskInput, params: &TaskParams) -> Result<String> {
        debug!("task {} ({}) on {}", self.number(), self.name(), input.path.display());
        if self.uses_map() {
            let map = HeightMap::load(&input.path)?;
            return self.solve_map(&map, params);
        }
        let format = input.format.ok_or(LabError::MissingParam("format"))?;
        let graph = load_graph(&input.path, format)?;
        self.solve_graph(&graph, params)
    }

    pub fn solve_graph(self, graph: &LoadedGraph, params: &TaskParams) -> Result<String> {
        let needs_undirected = matches!(
            self,
            Task::BridgesAndCutVertices | Task::SpanningTree | Task::Distances
        );
        if needs_undirected && graph.is_directed() {
            return Ok(UNDIRECTED_ONLY.to_string());
        }
        let storage = graph.storage();

        let report = match self {
            Task::Connectivity => match graph {
                LoadedGraph::Directed(g) => connectivity(g, params.traversal).to_report(),
                LoadedGraph::Undirected(g) => connectivity(g, params.traversal).to_report(),
            },
            Task::BridgesAndCutVertices => {
                bridges_and_cut_vertices(storage, BridgeOrder::Sorted).to_report()
            }
            Task::SpanningTree => spanning_tree(storage, params.traversal).to_report(),
            Task::Distances => graph_distances(storage).to_report(),
            Task::Bipartite => bipartition(storage).to_report(),
            Task::StrongComponents => strong_components(storage).to_report(),
            Task::Bridges => bridges_and_cut_vertices(storage, BridgeOrder::Discovery).to_report(),
            Task::MinimumSpanningTree => match params.mst {
                MstMethod::Kruskal => kruskal_mst(storage).to_report(),
                MstMethod::Prim => prim_mst(storage).to_report(),
            },
            Task::ComponentDistances => component_distances(storage).to_report(),
            Task::BellmanFord => {
                let start = params.start_vertex.unwrap_or(1);
                let source = storage.node_id(&start).ok_or(LabError::InvalidVertex {
                    vertex: start as i64,
                    order: storage.order(),
                })?;
                bellman_ford(storage, source).to_report()
            }
            Task::Matching => maximum_matching(storage).to_report(),
            Task::MaxFlow => ford_fulkerson(FlowNetwork::from_graph(graph.as_directed())?).to_report(),
            Task::Salesman => ant_colony_tsp(storage, &params.ant_colony)?.to_report(),
            Task::Maze | Task::MapPath => return Err(LabError::UnsupportedInput(self.name())),
        };
        Ok(report)
    }

    pub fn solve_map(self, map: &HeightMap, params: &TaskParams) -> Result<String> {
        let start = params.start.ok_or(LabError::MissingParam("start"))?;
        let goal = params.goal.ok_or(LabError::MissingParam("goal"))?;
        match self {
            Task::Maze => Ok(MazeRoute {
                map,
                start,
                goal,
                path: maze_shortest_path(map, start, goal)?,
            }
            .to_report()),
            Task::MapPath => Ok(MapRoute {
                start,
                goal,
                path: a_star(map, start, goal, params.heuristic)?,
            }
            .to_report()),
            _ => Err(LabError::UnsupportedInput(self.name())),
        }
    }
}

/// Where a task reads its input. `format` is required for graph tasks and ignored for maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskInput {
    pub path: PathBuf,
    pub format: Option<GraphFormat>,
}

/// Per-run knobs; everything has the lab default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskParams {
    pub traversal: Traversal,
    pub mst: MstMethod,
    /// Bellman–Ford source vertex, 1 when absent.
    pub start_vertex: Option<usize>,
    /// Grid endpoints for the maze and map tasks, zero-based `[row, col]`.
    pub start: Option<Cell>,
    pub goal: Option<Cell>,
    pub heuristic: Heuristic,
    pub ant_colony: AntColonyParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_graph;

    #[test]
    fn numbers_follow_lab_order() {
        assert_eq!(Task::Connectivity.number(), 1);
        assert_eq!(Task::Maze.number(), 6);
        assert_eq!(Task::Salesman.number(), 15);
    }

    #[test]
    fn undirected_tasks_refuse_digraphs() {
        let g = parse_graph("2\n1 2\n", GraphFormat::EdgeList).unwrap();
        for task in [Task::BridgesAndCutVertices, Task::SpanningTree, Task::Distances] {
            assert_eq!(task.solve_graph(&g, &TaskParams::default()).unwrap(), UNDIRECTED_ONLY);
        }
        assert_eq!(
            Task::Bridges.solve_graph(&g, &TaskParams::default()).unwrap(),
            "Bridges:\n [(1, 2)]\nCut vertices:\n []"
        );
    }

    #[test]
    fn bellman_ford_start_comes_from_params() {
        let g = parse_graph("2\n1 2 3\n", GraphFormat::EdgeList).unwrap();
        let params = TaskParams {
            start_vertex: Some(2),
            ..TaskParams::default()
        };
        assert_eq!(
            Task::BellmanFord.solve_graph(&g, &params).unwrap(),
            "Shotest paths lengths from 2:\n{1: 'inf', 2: 0}"
        );
        let params = TaskParams {
            start_vertex: Some(9),
            ..TaskParams::default()
        };
        assert!(matches!(
            Task::BellmanFord.solve_graph(&g, &params),
            Err(LabError::InvalidVertex { vertex: 9, order: 2 })
        ));
    }

    #[test]
    fn map_tasks_need_endpoints() {
        let map = HeightMap::parse("1 1\n1 1\n").unwrap();
        assert!(matches!(
            Task::Maze.solve_map(&map, &TaskParams::default()),
            Err(LabError::MissingParam("start"))
        ));
        let g = parse_graph("1\n", GraphFormat::EdgeList).unwrap();
        assert!(matches!(
            Task::MapPath.solve_graph(&g, &TaskParams::default()),
            Err(LabError::UnsupportedInput("map_path"))
        ));
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: TaskParams =
            serde_json::from_str(r#"{"mst": "prim", "start": [0, 1], "ant_colony": {"seed": 3}}"#)
                .unwrap();
        assert_eq!(params.mst, MstMethod::Prim);
        assert_eq!(params.start, Some((0, 1)));
        assert_eq!(params.traversal, Traversal::Dfs);
        assert_eq!(params.ant_colony.seed, Some(3));
        assert_eq!(params.ant_colony.iterations, 200);
    }
}
