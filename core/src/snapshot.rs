use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of the grid for presentation layers: dimensions plus
/// per-cell color, `None` for empty cells. Safe to take at any time,
/// including while a settle cycle is in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: Coord2,
    pub colors: ColorCount,
    pub cells: Array2<Option<ColorId>>,
}

impl GridSnapshot {
    pub fn new(size: Coord2, colors: ColorCount, cells: Array2<Option<ColorId>>) -> Result<Self> {
        let snapshot = Self {
            size,
            colors,
            cells,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_engine(engine: &PlayEngine) -> Self {
        Self::from_grid(engine.grid())
    }

    pub fn from_grid(grid: &TileGrid) -> Self {
        let size = grid.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), None);
        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                cells[(row, col).to_nd_index()] = grid[(row, col)].color();
            }
        }

        Self {
            size,
            colors: grid.color_count(),
            cells,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let dim = self.cells.dim();
        if dim != (usize::from(self.size.0), usize::from(self.size.1)) {
            return Err(GameError::InvalidBoardShape);
        }
        for cell in &self.cells {
            if let Some(color) = *cell {
                if color >= self.colors {
                    return Err(GameError::InvalidColor);
                }
            }
        }
        Ok(())
    }

    pub fn color_at(&self, coords: Coord2) -> Option<ColorId> {
        self.cells[coords.to_nd_index()]
    }

    pub fn occupied_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_some())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == mult(self.size.0, self.size.1)
    }
}
