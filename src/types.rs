/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Value stored in one board cell: [`MINE`] or the `0..=8` count of mines
/// in the cell's 8-neighborhood.
pub type CellValue = i8;

/// Cell value marking a mine.
pub const MINE: CellValue = -1;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the in-bounds 8-neighborhood of `center` within
/// `bounds = (rows, cols)`.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.iter().filter_map(move |&(dr, dc)| {
        let row = center.0 as i16 + dr;
        let col = center.1 as i16 + dc;
        let in_bounds = row >= 0
            && col >= 0
            && (row as CellCount) < bounds.0 as CellCount
            && (col as CellCount) < bounds.1 as CellCount;
        in_bounds.then(|| (row as Coord, col as Coord))
    })
}

/// Chebyshev-distance check used for the 3x3 safe zone around a first click.
pub const fn is_adjacent_or_same(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_clip_at_corners() {
        let corner: Vec<Coord2> = neighbors((0, 0), (9, 9)).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);

        let opposite: Vec<Coord2> = neighbors((8, 8), (9, 9)).collect();
        assert_eq!(opposite, vec![(7, 7), (7, 8), (8, 7)]);
    }

    #[test]
    fn neighbors_interior_has_eight() {
        assert_eq!(neighbors((4, 4), (9, 9)).count(), 8);
    }

    #[test]
    fn neighbors_clip_on_edges() {
        assert_eq!(neighbors((0, 4), (9, 9)).count(), 5);
        assert_eq!(neighbors((4, 0), (9, 9)).count(), 5);
    }

    #[test]
    fn adjacency_is_chebyshev_distance_one() {
        assert!(is_adjacent_or_same((4, 4), (4, 4)));
        assert!(is_adjacent_or_same((4, 4), (3, 5)));
        assert!(!is_adjacent_or_same((4, 4), (2, 4)));
        assert!(!is_adjacent_or_same((0, 0), (2, 2)));
    }
}
