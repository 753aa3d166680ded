use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::map::{Cell, HeightMap};
use crate::report::{ReportDisplay, list, pair};
use crate::visual::render_route;

/// Paths with more cells than this are drawn on the map instead of listed.
pub const MAX_LISTED_CELLS: usize = 100;

/// A* distance estimate between two cells. Heights are ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Chebyshev,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, a: Cell, b: Cell) -> f64 {
        let dr = a.0.abs_diff(b.0) as f64;
        let dc = a.1.abs_diff(b.1) as f64;
        match self {
            Heuristic::Manhattan => dr + dc,
            Heuristic::Chebyshev => dr.max(dc),
            Heuristic::Euclidean => (dr * dr + dc * dc).sqrt(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPath {
    pub cost: i64,
    /// Start to goal inclusive.
    pub cells: Vec<Cell>,
}

impl GridPath {
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

fn walk_back(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(&prev) = came_from.get(&current) else { break };
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    cells
}

/// Dijkstra over the 4-neighbourhood with step cost `1 + |Δheight|`. The search stops as soon
/// as the goal leaves the queue.
pub fn maze_shortest_path(map: &HeightMap, start: Cell, goal: Cell) -> Result<Option<GridPath>> {
    map.check_cell(start)?;
    map.check_cell(goal)?;

    let mut dist: HashMap<Cell, i64> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut heap = BinaryHeap::from([Reverse((0i64, start))]);
    let mut settled = 0usize;
    while let Some(Reverse((cost, cell))) = heap.pop() {
        if cell == goal {
            break;
        }
        if dist.get(&cell).is_some_and(|&d| cost > d) {
            continue;
        }
        settled += 1;
        for next in map.neighbors(cell) {
            let candidate = cost + map.distance(cell, next);
            if dist.get(&next).is_none_or(|&d| candidate < d) {
                dist.insert(next, candidate);
                came_from.insert(next, cell);
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    debug!("maze dijkstra settled {settled} cell(s)");

    Ok(dist.get(&goal).map(|&cost| GridPath {
        cost,
        cells: walk_back(&came_from, start, goal),
    }))
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Open {
    f: f64,
    cell: Cell,
}

impl Eq for Open {}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* over the same grid model as the maze search. Queue entries are ordered by
/// `g + h`, then by cell.
pub fn a_star(map: &HeightMap, start: Cell, goal: Cell, heuristic: Heuristic) -> Result<Option<GridPath>> {
    map.check_cell(start)?;
    map.check_cell(goal)?;

    let mut g_score: HashMap<Cell, i64> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut open = BinaryHeap::from([Reverse(Open {
        f: heuristic.estimate(start, goal),
        cell: start,
    })]);
    let mut expanded = 0usize;
    while let Some(Reverse(Open { cell, .. })) = open.pop() {
        let Some(&g) = g_score.get(&cell) else { continue };
        if cell == goal {
            debug!("a*: expanded {expanded} cell(s)");
            return Ok(Some(GridPath {
                cost: g,
                cells: walk_back(&came_from, start, goal),
            }));
        }
        expanded += 1;
        for next in map.neighbors(cell) {
            let tentative = g + map.distance(cell, next);
            if g_score.get(&next).is_none_or(|&old| tentative < old) {
                came_from.insert(next, cell);
                g_score.insert(next, tentative);
                open.push(Reverse(Open {
                    f: tentative as f64 + heuristic.estimate(next, goal),
                    cell: next,
                }));
            }
        }
    }
    debug!("a*: goal unreachable after {expanded} cell(s)");
    Ok(None)
}

fn cell(c: Cell) -> String {
    pair(c.0, c.1)
}

fn cell_list(cells: &[Cell]) -> String {
    list(cells.iter().map(|&c| cell(c)))
}

/// Maze lab report; long paths are drawn over the map.
pub struct MazeRoute<'a> {
    pub map: &'a HeightMap,
    pub start: Cell,
    pub goal: Cell,
    pub path: Option<GridPath>,
}

impl ReportDisplay for MazeRoute<'_> {
    fn to_report(&self) -> String {
        let Some(path) = &self.path else {
            return "No path found".to_string();
        };
        let head = format!(
            "Length of path from {} to {}: {}",
            cell(self.start),
            cell(self.goal),
            path.steps()
        );
        if path.cells.len() <= MAX_LISTED_CELLS {
            format!("{head}\nPath:\n{}", cell_list(&path.cells))
        } else {
            format!("{head}\n{}", render_route(self.map, &path.cells, self.start, self.goal))
        }
    }
}

pub struct MapRoute {
    pub start: Cell,
    pub goal: Cell,
    pub path: Option<GridPath>,
}

impl ReportDisplay for MapRoute {
    fn to_report(&self) -> String {
        let (cost, cells) = match &self.path {
            Some(p) => (p.cost, cell_list(&p.cells)),
            None => (0, "[]".to_string()),
        };
        format!(
            "{cost} - length of path between {} and {} points.\nPath:\n{cells}",
            cell(self.start),
            cell(self.goal)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    const MAZE: &str = "3 4\n1 1 1 1\n1 0 0 1\n1 1 1 1\n";

    #[test]
    fn maze_goes_around_the_wall() {
        let map = HeightMap::parse(MAZE).unwrap();
        let path = maze_shortest_path(&map, (1, 0), (1, 3)).unwrap().unwrap();
        assert_eq!(path.steps(), 5);
        assert_eq!(path.cost, 5);
        assert_eq!(path.cells.first(), Some(&(1, 0)));
        assert_eq!(path.cells.last(), Some(&(1, 3)));
        let report = MazeRoute {
            map: &map,
            start: (1, 0),
            goal: (1, 3),
            path: Some(path),
        }
        .to_report();
        assert!(report.starts_with("Length of path from (1, 0) to (1, 3): 5\nPath:\n[(1, 0), "));
    }

    #[test]
    fn climbing_costs_more_than_walking_around() {
        let map = HeightMap::parse("1 9 1\n1 1 1\n").unwrap();
        let path = maze_shortest_path(&map, (0, 0), (0, 2)).unwrap().unwrap();
        assert_eq!(path.cells, vec![(0, 0), (1, 0), (1, 1), (1, 2), (0, 2)]);
        assert_eq!(path.cost, 4);
    }

    #[test]
    fn unreachable_goal() {
        let map = HeightMap::parse("1 0 1\n").unwrap();
        let path = maze_shortest_path(&map, (0, 0), (0, 2)).unwrap();
        assert_eq!(path, None);
        let report = MazeRoute {
            map: &map,
            start: (0, 0),
            goal: (0, 2),
            path,
        };
        assert_eq!(report.to_report(), "No path found");
    }

    #[test]
    fn endpoints_must_be_on_the_map() {
        let map = HeightMap::parse(MAZE).unwrap();
        assert!(matches!(
            maze_shortest_path(&map, (3, 0), (0, 0)),
            Err(LabError::InvalidCell { row: 3, col: 0 })
        ));
        assert!(matches!(
            a_star(&map, (0, 0), (0, 4), Heuristic::Manhattan),
            Err(LabError::InvalidCell { row: 0, col: 4 })
        ));
    }

    #[test]
    fn wall_start_is_left_and_wall_goal_is_never_reached() {
        let map = HeightMap::parse("0 1 1
").unwrap();
        let path = maze_shortest_path(&map, (0, 0), (0, 2)).unwrap().unwrap();
        assert_eq!(path.cells, vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(path.cost, 3);
        let found = a_star(&map, (0, 0), (0, 2), Heuristic::Manhattan).unwrap().unwrap();
        assert_eq!(found.cost, 3);

        let walled_goal = HeightMap::parse("1 1 0
").unwrap();
        assert_eq!(maze_shortest_path(&walled_goal, (0, 0), (0, 2)).unwrap(), None);
        assert_eq!(a_star(&walled_goal, (0, 0), (0, 2), Heuristic::Manhattan).unwrap(), None);
    }

    #[test]
    fn a_star_matches_dijkstra_cost() {
        let map = HeightMap::parse("1 2 3\n2 8 2\n1 1 1\n").unwrap();
        let dijkstra = maze_shortest_path(&map, (0, 0), (2, 2)).unwrap().unwrap();
        for h in [Heuristic::Manhattan, Heuristic::Chebyshev, Heuristic::Euclidean] {
            let found = a_star(&map, (0, 0), (2, 2), h).unwrap().unwrap();
            assert_eq!(found.cost, dijkstra.cost, "{h:?}");
        }
    }

    #[test]
    fn a_star_report() {
        let map = HeightMap::parse("1 1\n0 1\n").unwrap();
        let path = a_star(&map, (0, 0), (1, 1), Heuristic::Manhattan).unwrap();
        let report = MapRoute {
            start: (0, 0),
            goal: (1, 1),
            path,
        };
        assert_eq!(
            report.to_report(),
            "2 - length of path between (0, 0) and (1, 1) points.\nPath:\n[(0, 0), (0, 1), (1, 1)]"
        );
    }

    #[test]
    fn a_star_unreachable_prints_zero() {
        let map = HeightMap::parse("1 0 1\n").unwrap();
        let report = MapRoute {
            start: (0, 0),
            goal: (0, 2),
            path: a_star(&map, (0, 0), (0, 2), Heuristic::Chebyshev).unwrap(),
        };
        assert_eq!(
            report.to_report(),
            "0 - length of path between (0, 0) and (0, 2) points.\nPath:\n[]"
        );
    }

    fn corridor(len: usize) -> HeightMap {
        HeightMap::parse(&vec!["1"; len].join(" ")).unwrap()
    }

    fn corridor_report(len: usize) -> String {
        let map = corridor(len);
        let goal = (0, len - 1);
        MazeRoute {
            map: &map,
            start: (0, 0),
            goal,
            path: maze_shortest_path(&map, (0, 0), goal).unwrap(),
        }
        .to_report()
    }

    #[test]
    fn hundred_cells_are_listed() {
        let report = corridor_report(MAX_LISTED_CELLS);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Length of path from (0, 0) to (0, 99): 99");
        assert_eq!(lines[1], "Path:");
        assert!(lines[2].starts_with("[(0, 0), (0, 1), "));
        assert!(lines[2].ends_with("(0, 99)]"));
    }

    #[test]
    fn longer_paths_are_drawn() {
        let report = corridor_report(MAX_LISTED_CELLS + 1);
        assert_eq!(
            report,
            format!("Length of path from (0, 0) to (0, 100): 100\n>{}x", ".".repeat(99))
        );
    }

    #[test]
    fn heuristics() {
        assert_eq!(Heuristic::Manhattan.estimate((0, 0), (3, 4)), 7.0);
        assert_eq!(Heuristic::Chebyshev.estimate((0, 0), (3, 4)), 4.0);
        assert_eq!(Heuristic::Euclidean.estimate((0, 0), (3, 4)), 5.0);
    }
}
