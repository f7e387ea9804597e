use super::*;

/// Generation strategy that fills every cell with a uniformly random palette
/// color. Does not try to avoid pre-made matchable regions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> TileGrid {
        use rand::prelude::*;

        if config.colors == 0 {
            log::warn!("Empty palette, generated an empty grid");
            return TileGrid::new(config.size, 0);
        }
        if config.colors < 3 {
            log::warn!(
                "Palette of {} colors makes most picks eliminable, expected at least 3",
                config.colors
            );
        }

        let (rows, cols) = config.size;
        let mut grid = TileGrid::new(config.size, config.colors);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for row in 0..rows {
            for col in 0..cols {
                grid.populate((row, col), &mut rng)
                    .expect("coords iterate the configured size");
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_grid_is_fully_populated_within_the_palette() {
        let config = GameConfig::new((6, 5), 4, 3);

        let board = RandomGridGenerator::new(1).generate(config);

        assert_eq!(board.occupied_count(), 30);
        let (rows, cols) = board.size();
        for row in 0..rows {
            for col in 0..cols {
                let color = board[(row, col)].color().unwrap();
                assert!(color < 4);
            }
        }
    }

    #[test]
    fn same_seed_generates_the_same_grid() {
        let config = GameConfig::default();

        assert_eq!(
            RandomGridGenerator::new(9).generate(config),
            RandomGridGenerator::new(9).generate(config)
        );
    }

    #[test]
    fn empty_palette_generates_an_empty_grid() {
        let config = GameConfig::new_unchecked((3, 3), 0, 3);

        let board = RandomGridGenerator::new(0).generate(config);

        assert_eq!(board.occupied_count(), 0);
    }
}
