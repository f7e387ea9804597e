use serde::{Deserialize, Serialize};

use crate::ColorId;

/// Canonical per-cell state stored by the grid. A cell carries a color
/// exactly when it is occupied.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileCell {
    Empty,
    Tile(ColorId),
}

impl TileCell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Tile(_))
    }

    pub const fn color(self) -> Option<ColorId> {
        match self {
            Self::Empty => None,
            Self::Tile(color) => Some(color),
        }
    }
}

impl Default for TileCell {
    fn default() -> Self {
        Self::Empty
    }
}
