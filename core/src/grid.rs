use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};

use crate::*;

/// The mutable tile board: a fixed-shape grid of cells plus the size of the
/// palette its colors are drawn from. The shape never changes after
/// construction; collapse and refill move cell values between positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    cells: Array2<TileCell>,
    colors: ColorCount,
}

impl TileGrid {
    /// All-empty grid of the given shape.
    pub fn new(size: Coord2, colors: ColorCount) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            colors,
        }
    }

    pub fn from_cells(cells: Array2<TileCell>, colors: ColorCount) -> Result<Self> {
        for &cell in &cells {
            if let TileCell::Tile(color) = cell {
                if color >= colors {
                    return Err(GameError::InvalidColor);
                }
            }
        }
        Ok(Self { cells, colors })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn color_count(&self) -> ColorCount {
        self.colors
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn occupied_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_occupied())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn is_valid(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_valid(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<TileCell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn set(&mut self, coords: Coord2, cell: TileCell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if let TileCell::Tile(color) = cell {
            if color >= self.colors {
                return Err(GameError::InvalidColor);
            }
        }
        self[coords] = cell;
        Ok(())
    }

    /// Occupies the cell with a uniformly random palette color.
    pub fn populate<R: Rng>(&mut self, coords: Coord2, rng: &mut R) -> Result<ColorId> {
        let coords = self.validate_coords(coords)?;
        if self.colors == 0 {
            return Err(GameError::EmptyPalette);
        }
        let color = rng.random_range(0..self.colors);
        self[coords] = TileCell::Tile(color);
        Ok(color)
    }

    pub fn clear(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self[coords] = TileCell::Empty;
        Ok(())
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for TileGrid {
    type Output = TileCell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for TileGrid {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn get_and_set_enforce_bounds() {
        let mut board = TileGrid::new((2, 2), 3);

        assert_eq!(board.get((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.set((0, 2), TileCell::Empty), Err(GameError::OutOfBounds));

        board.set((1, 1), TileCell::Tile(2)).unwrap();
        assert_eq!(board.get((1, 1)), Ok(TileCell::Tile(2)));
    }

    #[test]
    fn set_rejects_colors_outside_the_palette() {
        let mut board = TileGrid::new((2, 2), 3);

        assert_eq!(
            board.set((0, 0), TileCell::Tile(3)),
            Err(GameError::InvalidColor)
        );
        assert_eq!(board[(0, 0)], TileCell::Empty);
    }

    #[test]
    fn populate_and_clear_flip_occupancy() {
        let mut board = TileGrid::new((2, 2), 5);
        let mut rng = SmallRng::seed_from_u64(3);

        let color = board.populate((0, 1), &mut rng).unwrap();
        assert!(color < 5);
        assert_eq!(board[(0, 1)], TileCell::Tile(color));
        assert_eq!(board.occupied_count(), 1);

        board.clear((0, 1)).unwrap();
        assert!(board[(0, 1)].is_empty());
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn populate_fails_on_an_empty_palette() {
        let mut board = TileGrid::new((1, 1), 0);
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(board.populate((0, 0), &mut rng), Err(GameError::EmptyPalette));
    }

    #[test]
    fn from_cells_validates_against_the_palette() {
        let cells = Array2::from_elem((2, 2), TileCell::Tile(4));

        assert!(TileGrid::from_cells(cells.clone(), 5).is_ok());
        assert_eq!(TileGrid::from_cells(cells, 4), Err(GameError::InvalidColor));
    }
}
