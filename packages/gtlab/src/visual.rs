//! ASCII drawing of a route over a height map.

use crate::map::{Cell, HeightMap};

const WALL: char = '8';
const OPEN: char = ' ';
const START: char = '>';
const GOAL: char = 'x';
const ROUTE: char = '.';

/// One text line per map row: walls as `8`, open cells blank, the route as `.` with `>` at the
/// start and `x` at the goal.
pub fn render_route(map: &HeightMap, route: &[Cell], start: Cell, goal: Cell) -> String {
    let mut canvas: Vec<Vec<char>> = (0..map.rows())
        .map(|r| {
            (0..map.cols())
                .map(|c| if map.is_passable((r, c)) { OPEN } else { WALL })
                .collect()
        })
        .collect();

    for &(r, c) in route {
        let Some(slot) = canvas.get_mut(r).and_then(|row| row.get_mut(c)) else {
            continue;
        };
        *slot = if (r, c) == start {
            START
        } else if (r, c) == goal {
            GOAL
        } else {
            ROUTE
        };
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_walls_route_and_endpoints() {
        let map = HeightMap::parse("1 1 1\n0 0 1\n1 1 1\n").unwrap();
        let route = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)];
        assert_eq!(
            render_route(&map, &route, (0, 0), (2, 2)),
            ">..\n88.\n  x"
        );
    }
}
