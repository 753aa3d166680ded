//! Height maps for the maze and map labs. Cell `(row, col)` is passable when its height is
//! positive; `0` is a wall.

use std::path::Path;

use log::debug;

use crate::error::{LabError, ParseError, Result};
use crate::io::{Line, non_blank_lines, parse_row};

pub type Cell = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    rows: usize,
    cols: usize,
    heights: Vec<i64>,
}

impl HeightMap {
    /// Parse map text. A leading `rows cols` header is optional: when the first line has two
    /// integers but the data does not match them, the text is read again without a header.
    pub fn parse(text: &str) -> Result<Self> {
        let lines = non_blank_lines(text);
        let first = lines.first().ok_or(ParseError::Empty)?;
        let first_row = parse_row(first)?;
        if let [r, c] = first_row[..] {
            if r >= 0 && c >= 0 {
                if let Ok(map) = Self::from_rows(&lines[1..], Some((r as usize, c as usize))) {
                    return Ok(map);
                }
            }
        }
        Self::from_rows(&lines, None)
    }

    fn from_rows(lines: &[Line<'_>], dims: Option<(usize, usize)>) -> Result<Self> {
        let mut heights = Vec::new();
        let mut cols = dims.map(|(_, c)| c);
        for line in lines {
            let row = parse_row(line)?;
            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ParseError::RaggedRow {
                    line: line.number,
                    expected,
                    found: row.len(),
                }
                .into());
            }
            heights.extend(row);
        }
        let cols = cols.unwrap_or(0);
        let rows = lines.len();
        if let Some((declared, _)) = dims {
            if declared != rows {
                return Err(ParseError::Malformed {
                    line: lines.first().map_or(1, |l| l.number),
                    expected: "as many rows as the header declares",
                    found: format!("{rows} rows"),
                }
                .into());
            }
        }
        if rows == 0 || cols == 0 {
            return Err(ParseError::Empty.into());
        }
        debug!("loaded {rows}x{cols} height map");
        Ok(Self {
            rows,
            cols,
            heights,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LabError::io(path, e))?;
        Self::parse(&text)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn height(&self, (r, c): Cell) -> Option<i64> {
        if r < self.rows && c < self.cols {
            Some(self.heights[r * self.cols + c])
        } else {
            None
        }
    }

    pub fn is_passable(&self, cell: Cell) -> bool {
        self.height(cell).is_some_and(|h| h > 0)
    }

    /// Start and goal cells must be on the map. A wall endpoint is allowed: the search can
    /// leave a wall start, and a wall goal is never entered.
    pub fn check_cell(&self, cell: Cell) -> Result<()> {
        if self.height(cell).is_some() {
            Ok(())
        } else {
            Err(LabError::InvalidCell {
                row: cell.0,
                col: cell.1,
            })
        }
    }

    /// Passable neighbours in the order up, down, left, right.
    pub fn neighbors(&self, (r, c): Cell) -> impl Iterator<Item = Cell> + '_ {
        let up = r.checked_sub(1).map(|r| (r, c));
        let down = Some((r + 1, c));
        let left = c.checked_sub(1).map(|c| (r, c));
        let right = Some((r, c + 1));
        [up, down, left, right]
            .into_iter()
            .flatten()
            .filter(move |&cell| self.is_passable(cell))
    }

    /// `|Δrow| + |Δcol| + |Δheight|`; for adjacent cells this is `1 + |Δheight|`.
    pub fn distance(&self, a: Cell, b: Cell) -> i64 {
        let ha = self.height(a).unwrap_or(0);
        let hb = self.height(b).unwrap_or(0);
        (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as i64 + (ha - hb).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_optional() {
        let with_header = HeightMap::parse("2 3\n1 0 2\n3 1 1\n").unwrap();
        let without = HeightMap::parse("1 0 2\n3 1 1\n").unwrap();
        assert_eq!(with_header, without);
        assert_eq!((with_header.rows(), with_header.cols()), (2, 3));
    }

    #[test]
    fn two_column_map_without_header_falls_back() {
        let map = HeightMap::parse("1 2\n3 4\n5 6\n").unwrap();
        assert_eq!((map.rows(), map.cols()), (3, 2));
        assert_eq!(map.height((0, 1)), Some(2));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            HeightMap::parse("1 1 1\n1 1\n"),
            Err(LabError::Parse(ParseError::RaggedRow { line: 2, .. }))
        ));
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        let map = HeightMap::parse("1 0 1\n2 5 1\n").unwrap();
        let n: Vec<Cell> = map.neighbors((1, 1)).collect();
        assert_eq!(n, vec![(1, 0), (1, 2)]);
        let n: Vec<Cell> = map.neighbors((0, 0)).collect();
        assert_eq!(n, vec![(1, 0)]);
        assert_eq!(map.distance((1, 0), (1, 1)), 4);
        assert!(map.check_cell((0, 1)).is_ok());
        assert!(map.check_cell((5, 5)).is_err());
        assert!(map.check_cell((2, 0)).is_err());
    }
}
