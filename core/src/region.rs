use alloc::collections::{BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};

use crate::*;

/// Maximal 4-connected set of same-colored cells, captured at lookup time.
/// Transient: a region is never stored across grid mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    color: ColorId,
    cells: BTreeSet<Coord2>,
}

impl Region {
    pub fn color(&self) -> ColorId {
        self.color
    }

    pub fn len(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }

    pub fn cells(&self) -> &BTreeSet<Coord2> {
        &self.cells
    }
}

/// Collects the maximal region of `start`'s color around `start`. The target
/// color is captured once from `start`; the grid is never mutated during the
/// traversal, and the frontier queue keeps the walk depth bounded by an
/// explicit collection.
pub fn find_region(grid: &TileGrid, start: Coord2) -> Result<Region> {
    let start = grid
        .validate_coords(start)
        .map_err(|_| GameError::InvalidStart)?;
    let TileCell::Tile(color) = grid[start] else {
        return Err(GameError::InvalidStart);
    };

    let mut cells = BTreeSet::new();
    let mut to_visit = VecDeque::from([start]);

    while let Some(visit_coords) = to_visit.pop_front() {
        if !cells.insert(visit_coords) {
            continue;
        }

        to_visit.extend(
            grid.iter_neighbors(visit_coords)
                .filter(|&pos| grid[pos] == TileCell::Tile(color))
                .filter(|pos| !cells.contains(pos)),
        );
    }

    Ok(Region { color, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn board(rows: &[&str]) -> TileGrid {
        let shape = (rows.len(), rows[0].len());
        let mut cells = Array2::from_elem(shape, TileCell::Empty);
        for (row, line) in rows.iter().enumerate() {
            for (col, byte) in line.bytes().enumerate() {
                if byte != b'.' {
                    cells[(row, col)] = TileCell::Tile(byte - b'0');
                }
            }
        }
        TileGrid::from_cells(cells, 9).unwrap()
    }

    #[test]
    fn region_holds_start_and_all_connected_same_colors() {
        let board = board(&["010", "111", "010"]);

        let region = find_region(&board, (1, 1)).unwrap();

        assert_eq!(region.color(), 1);
        assert_eq!(region.len(), 5);
        assert!(region.contains((1, 1)));
        assert!(region.contains((0, 1)));
        assert!(!region.contains((0, 0)));
    }

    #[test]
    fn diagonal_contact_does_not_join_a_region() {
        let board = board(&["101", "010", "101"]);

        let region = find_region(&board, (1, 1)).unwrap();

        assert_eq!(region.len(), 1);
        assert!(region.contains((1, 1)));
    }

    #[test]
    fn isolated_cell_yields_a_singleton_region() {
        let board = board(&["22", "21"]);

        let region = find_region(&board, (1, 1)).unwrap();

        assert_eq!(region.len(), 1);
        assert_eq!(region.color(), 1);
    }

    #[test]
    fn lookup_rejects_empty_and_out_of_bounds_starts() {
        let board = board(&["1.", "11"]);

        assert_eq!(find_region(&board, (0, 1)), Err(GameError::InvalidStart));
        assert_eq!(find_region(&board, (5, 0)), Err(GameError::InvalidStart));
    }

    #[test]
    fn repeated_lookup_on_an_unchanged_grid_is_identical() {
        let board = board(&["112", "212", "221"]);

        let first = find_region(&board, (0, 0)).unwrap();
        let second = find_region(&board, (0, 0)).unwrap();

        assert_eq!(first, second);
    }
}
