use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Input gate state. While a settle cycle is in flight every pick is
/// rejected without touching the grid; that is the engine's sole
/// re-entrancy guarantee.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Accepting,
    Busy,
}

impl EngineState {
    pub const fn is_accepting(self) -> bool {
        matches!(self, Self::Accepting)
    }

    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Busy)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Accepting
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
enum SettlePhase {
    Collapsing,
    Refilling,
    Reopening,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct PendingSettle {
    cleared: Region,
    moves: Vec<TileMove>,
    spawns: Vec<TileSpawn>,
    phase: SettlePhase,
}

/// Everything one pick cycle did to the grid, in commit order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub cleared: Region,
    pub moves: Vec<TileMove>,
    pub spawns: Vec<TileSpawn>,
}

/// One presentation-visible step of an in-flight settle cycle. `Completed`
/// is the cycle's completion signal; it is returned by the same `advance`
/// call that reopens the gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SettleStep {
    Collapsed(Vec<TileMove>),
    Refilled(Vec<TileSpawn>),
    Completed(Settlement),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    grid: TileGrid,
    min_region: CellCount,
    seed: u64,
    cycles: u64,
    state: EngineState,
    pending: Option<PendingSettle>,
    last_settlement: Option<Settlement>,
}

impl PlayEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::from_grid(
            RandomGridGenerator::new(seed).generate(config),
            config.min_region,
            seed,
        )
    }

    pub fn from_grid(grid: TileGrid, min_region: CellCount, seed: u64) -> Self {
        Self {
            grid,
            min_region,
            seed,
            cycles: 0,
            state: Default::default(),
            pending: None,
            last_settlement: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn min_region(&self) -> CellCount {
        self.min_region
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> TileCell {
        self.grid[coords]
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.grid.size(), self.grid.color_count(), self.min_region)
    }

    /// The most recent completed cycle, kept for re-rendering final
    /// positions.
    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    /// Whether a pick at `coords` would eliminate anything right now.
    pub fn can_pick_at(&self, coords: Coord2) -> bool {
        if self.state.is_busy() || !self.grid.is_valid(coords) {
            return false;
        }

        match find_region(&self.grid, coords) {
            Ok(region) => region.len() >= self.min_region,
            Err(_) => false,
        }
    }

    /// Synchronous pick decision. On `Eliminated` the region's cells are
    /// already cleared, the gate is `Busy`, and the collapse/refill phases
    /// run through subsequent [`advance`](Self::advance) calls before the
    /// gate reopens.
    ///
    /// `Busy` and out-of-bounds picks are ordinary `Rejected` outcomes; an
    /// `InvalidStart` error can only come from picking an unoccupied cell,
    /// which a fully-populated grid never exposes.
    pub fn pick(&mut self, coords: Coord2) -> Result<PickOutcome> {
        if self.state.is_busy() {
            return Ok(PickOutcome::Rejected(RejectReason::Busy));
        }
        if !self.grid.is_valid(coords) {
            return Ok(PickOutcome::Rejected(RejectReason::OutOfBounds));
        }

        let region = find_region(&self.grid, coords)?;
        if region.len() < self.min_region {
            return Ok(PickOutcome::NoMatch);
        }

        // Elimination commits before any later phase of the cycle runs.
        for cell_coords in region.iter() {
            self.grid.clear(cell_coords)?;
        }
        self.state = EngineState::Busy;
        self.pending = Some(PendingSettle {
            cleared: region.clone(),
            moves: Vec::new(),
            spawns: Vec::new(),
            phase: SettlePhase::Collapsing,
        });

        Ok(PickOutcome::Eliminated(region))
    }

    /// Advances the in-flight cycle by one phase: collapse, then refill,
    /// then gate reopen. The presentation layer calls this each time its
    /// current visual step (fade-out, slide, drop-in) has finished; headless
    /// callers use [`settle`](Self::settle) instead.
    pub fn advance(&mut self) -> Result<SettleStep> {
        let Some(mut pending) = self.pending.take() else {
            return Err(GameError::NotSettling);
        };

        let step = match pending.phase {
            SettlePhase::Collapsing => {
                pending.moves = crate::settle::collapse(&mut self.grid);
                pending.phase = SettlePhase::Refilling;
                let step = SettleStep::Collapsed(pending.moves.clone());
                self.pending = Some(pending);
                step
            }
            SettlePhase::Refilling => {
                let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(self.cycles));
                match crate::settle::refill(&mut self.grid, &mut rng) {
                    Ok(spawns) => {
                        pending.spawns = spawns;
                        pending.phase = SettlePhase::Reopening;
                        let step = SettleStep::Refilled(pending.spawns.clone());
                        self.pending = Some(pending);
                        step
                    }
                    Err(err) => {
                        self.pending = Some(pending);
                        return Err(err);
                    }
                }
            }
            SettlePhase::Reopening => {
                let cleared_count = pending.cleared.len();
                let spawn_count: CellCount = pending.spawns.len().try_into().unwrap();
                if spawn_count != cleared_count {
                    log::warn!(
                        "Settle cycle count mismatch, cleared: {cleared_count}, spawned: {spawn_count}"
                    );
                }

                self.cycles += 1;
                self.state = EngineState::Accepting;
                let settlement = Settlement {
                    cleared: pending.cleared,
                    moves: pending.moves,
                    spawns: pending.spawns,
                };
                self.last_settlement = Some(settlement.clone());
                SettleStep::Completed(settlement)
            }
        };

        Ok(step)
    }

    /// Runs every remaining phase of the in-flight cycle at once, for
    /// callers that pace nothing.
    pub fn settle(&mut self) -> Result<Settlement> {
        loop {
            if let SettleStep::Completed(settlement) = self.advance()? {
                return Ok(settlement);
            }
        }
    }
}
