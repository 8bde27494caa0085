//! Server-authoritative Minesweeper engine.
//!
//! [`GameSession`] owns one game: board generation with a safe-first-move
//! guarantee, reveal/flag/chord moves, win/loss detection, and scoring. The
//! session serializes as the snapshot a host hands to its persistence layer
//! between moves; HTTP, storage, and identity live outside this crate.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use moves::*;
pub use types::*;
pub use view::*;

mod board;
mod difficulty;
mod engine;
mod error;
mod generator;
mod moves;
mod types;
mod view;

/// Board dimensions and mine count, either resolved from a difficulty
/// preset or supplied explicitly for custom boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Clamps dimensions to at least one cell and the mine count to the
    /// board area, so arbitrary client input cannot produce a degenerate
    /// configuration.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, mult(rows, cols));
        Self::new_unchecked(rows, cols, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}
