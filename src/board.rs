use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fully generated board: mine placement plus precomputed adjacency counts.
///
/// Each cell holds [`MINE`] or the number of mines among its 8 neighbors.
/// The layout never changes after generation; gameplay state lives in the
/// session's reveal and flag masks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask, filling in adjacency counts for
    /// every non-mine cell.
    pub fn from_mine_mask(mask: &Array2<bool>) -> Self {
        let (rows, cols) = mask.dim();
        let bounds = (rows as Coord, cols as Coord);
        let mut cells = Array2::zeros((rows, cols));
        let mut mine_count: CellCount = 0;

        for ((row, col), &is_mine) in mask.indexed_iter() {
            if is_mine {
                cells[(row, col)] = MINE;
                mine_count += 1;
            }
        }

        for ((row, col), &is_mine) in mask.indexed_iter() {
            if is_mine {
                continue;
            }
            let count = neighbors((row as Coord, col as Coord), bounds)
                .filter(|&(r, c)| mask[(r as usize, c as usize)])
                .count();
            cells[(row, col)] = count as CellValue;
        }

        Self { cells, mine_count }
    }

    /// Builds a board with mines at the given positions. Mostly useful for
    /// deterministic tests and replay tooling.
    pub fn from_mine_coords(rows: Coord, cols: Coord, mines: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default((rows as usize, cols as usize));
        for &(row, col) in mines {
            if row >= rows || col >= cols {
                return Err(GameError::InvalidCoords);
            }
            mask[(row as usize, col as usize)] = true;
        }
        Ok(Self::from_mine_mask(&mask))
    }

    pub fn rows(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    pub fn cols(&self) -> Coord {
        self.cells.dim().1 as Coord
    }

    pub fn bounds(&self) -> Coord2 {
        (self.rows(), self.cols())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn in_bounds(&self, row: Coord, col: Coord) -> bool {
        row < self.rows() && col < self.cols()
    }

    pub fn value_at(&self, (row, col): Coord2) -> CellValue {
        self.cells[(row as usize, col as usize)]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.value_at(coords) == MINE
    }

    pub fn neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> {
        neighbors(coords, self.bounds())
    }

    /// Raw cell values as nested rows, the layout sent over the wire.
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }
}
