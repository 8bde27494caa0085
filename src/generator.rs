use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// How much of the board around the first click must stay clear of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeZone {
    /// No constraint, fully random placement.
    Anywhere,
    /// The cell itself stays clear.
    Cell(Coord2),
    /// The cell and its full 8-neighborhood stay clear, so the first reveal
    /// always opens a cascade.
    Neighborhood(Coord2),
}

impl SafeZone {
    fn excludes(self, coords: Coord2) -> bool {
        match self {
            Self::Anywhere => false,
            Self::Cell(center) => coords == center,
            Self::Neighborhood(center) => is_adjacent_or_same(coords, center),
        }
    }

    /// Number of cells the zone keeps mine-free, before edge clipping.
    const fn reserved_cells(self) -> CellCount {
        match self {
            Self::Anywhere => 0,
            Self::Cell(_) => 1,
            Self::Neighborhood(_) => 9,
        }
    }
}

/// Mine placement by uniform rejection sampling: draw a random cell, retry
/// on collision with an already-mined or excluded cell, until the requested
/// count is placed. Runtime is probabilistic but well-bounded for the
/// supported densities (99 mines on 480 cells at worst).
#[derive(Clone, Debug, PartialEq)]
pub struct BoardGenerator {
    seed: u64,
    safe_zone: SafeZone,
}

impl BoardGenerator {
    pub fn new(seed: u64, safe_zone: SafeZone) -> Self {
        Self { seed, safe_zone }
    }

    pub fn generate(&self, config: GameConfig) -> Board {
        let total = config.total_cells();
        let mines = if config.mines > total {
            log::warn!(
                "requested {} mines but board only fits {}, clamping",
                config.mines,
                total
            );
            total
        } else {
            config.mines
        };

        // Shrink the safe zone when the mines would not fit around it.
        let safe_zone = match self.safe_zone {
            SafeZone::Anywhere => SafeZone::Anywhere,
            zone if mines + zone.reserved_cells() <= total => zone,
            SafeZone::Neighborhood(center) if mines < total => {
                log::warn!("cannot keep first-click neighborhood clear, shrinking to single cell");
                SafeZone::Cell(center)
            }
            zone => {
                log::warn!("cannot keep first click safe, falling back to random placement");
                debug_assert!(matches!(zone, SafeZone::Cell(_) | SafeZone::Neighborhood(_)));
                SafeZone::Anywhere
            }
        };

        let mut mask: Array2<bool> =
            Array2::default((config.rows as usize, config.cols as usize));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;

        while placed < mines {
            let row: Coord = rng.random_range(0..config.rows);
            let col: Coord = rng.random_range(0..config.cols);

            if safe_zone.excludes((row, col)) {
                continue;
            }
            let cell = &mut mask[(row as usize, col as usize)];
            if *cell {
                continue;
            }
            *cell = true;
            placed += 1;
        }
        log::debug!(
            "placed {placed} mines on {}x{} board (seed {})",
            config.rows,
            config.cols,
            self.seed
        );

        Board::from_mine_mask(&mask)
    }
}
