#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use region::*;
pub use settle::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod region;
mod settle;
mod snapshot;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub colors: ColorCount,
    pub min_region: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, colors: ColorCount, min_region: CellCount) -> Self {
        Self {
            size,
            colors,
            min_region,
        }
    }

    pub fn new((rows, cols): Coord2, colors: ColorCount, min_region: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let colors = colors.clamp(1, ColorCount::MAX);
        let min_region = min_region.clamp(1, mult(rows, cols));
        Self::new_unchecked((rows, cols), colors, min_region)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((9, 9), 6, 3)
    }
}

/// Synchronous decision of a pick; the grid only changes on `Eliminated`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PickOutcome {
    Rejected(RejectReason),
    NoMatch,
    Eliminated(Region),
}

impl PickOutcome {
    pub const fn has_update(&self) -> bool {
        matches!(self, Self::Eliminated(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    Busy,
    OutOfBounds,
}
