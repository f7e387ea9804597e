use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// One tile sliding straight down during the collapse phase.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMove {
    pub from: Coord2,
    pub to: Coord2,
    pub color: ColorId,
}

/// One fresh tile entering from above the grid during the refill phase.
/// `drop_rows` is the visual drop-in distance; the engine attaches no timing
/// semantics to it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSpawn {
    pub coords: Coord2,
    pub color: ColorId,
    pub drop_rows: Coord,
}

/// Empty cells strictly below `(row, col)` in its column.
pub(crate) fn empty_below(grid: &TileGrid, (row, col): Coord2) -> Coord {
    let (rows, _) = grid.size();
    ((row + 1)..rows)
        .filter(|&below| grid[(below, col)].is_empty())
        .count()
        .try_into()
        .unwrap()
}

pub(crate) fn empty_in_column(grid: &TileGrid, col: Coord) -> Coord {
    let (rows, _) = grid.size();
    (0..rows)
        .filter(|&row| grid[(row, col)].is_empty())
        .count()
        .try_into()
        .unwrap()
}

/// Closes every gap in every column. Columns never interact. Rows are
/// processed from the bottom upward and each move is applied immediately, so
/// an upper tile's hole count always sees lower holes already closed.
pub(crate) fn collapse(grid: &mut TileGrid) -> Vec<TileMove> {
    let (rows, cols) = grid.size();
    let mut moves = Vec::new();

    for col in 0..cols {
        // the bottom row has nowhere to fall
        for row in (0..rows.saturating_sub(1)).rev() {
            let TileCell::Tile(color) = grid[(row, col)] else {
                continue;
            };
            let holes = empty_below(grid, (row, col));
            if holes == 0 {
                continue;
            }

            let to = (row + holes, col);
            grid[to] = TileCell::Tile(color);
            grid[(row, col)] = TileCell::Empty;
            moves.push(TileMove {
                from: (row, col),
                to,
                color,
            });
        }
    }

    moves
}

/// Repopulates the post-collapse gap at the top of each column with fresh
/// random colors. Expects every remaining empty cell to sit above the
/// column's tiles, which `collapse` guarantees.
pub(crate) fn refill<R: Rng>(grid: &mut TileGrid, rng: &mut R) -> Result<Vec<TileSpawn>> {
    let (_, cols) = grid.size();
    let mut spawns = Vec::new();

    for col in 0..cols {
        let holes = empty_in_column(grid, col);
        for row in (0..holes).rev() {
            let color = grid.populate((row, col), rng)?;
            spawns.push(TileSpawn {
                coords: (row, col),
                color,
                drop_rows: holes - row,
            });
        }
    }

    // double check the column scans left nothing open
    let leftover = grid.total_cells() - grid.occupied_count();
    if leftover != 0 {
        log::warn!("Refill left {leftover} empty cells, column scan out of sync");
    }

    Ok(spawns)
}
