use crate::piece::{GridState, Piece, Side};
use crate::rng::{rand_bool, rand_index, SHUFFLE_SALT, SIDE_SALT};

pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLS: usize = 3;
/// Largest accepted side; keeps `rows * cols` far from `usize` limits on wasm32.
pub const MAX_GRID_SIDE: usize = 64;

/// Builds a fresh piece set in shuffled presentation order and an empty board.
///
/// Piece `i` always belongs in cell `i`; shuffling only changes the order the
/// pieces are handed to the pool.
///
/// Oversized grids are clamped to [`MAX_GRID_SIDE`] per axis.
pub fn generate(rows: usize, cols: usize, seed: u32) -> (Vec<Piece>, GridState) {
    let total = rows.min(MAX_GRID_SIDE) * cols.min(MAX_GRID_SIDE);
    let mut pieces = Vec::with_capacity(total);
    for index in 0..total {
        let side = if rand_bool(seed, SIDE_SALT.wrapping_add(index as u32)) {
            Side::Front
        } else {
            Side::Back
        };
        pieces.push(Piece::new(index, side));
    }
    shuffle(&mut pieces, seed);
    (pieces, GridState::empty(total))
}

/// Fisher-Yates, last index down to 1.
pub fn shuffle<T>(items: &mut [T], seed: u32) {
    for i in (1..items.len()).rev() {
        let j = rand_index(seed, SHUFFLE_SALT.wrapping_add(i as u32), i);
        items.swap(i, j);
    }
}

/// Grid dimensions with the 3x3 fallback for missing or zero values,
/// capped at [`MAX_GRID_SIDE`] per axis.
pub fn grid_or_default(rows: Option<usize>, cols: Option<usize>) -> (usize, usize) {
    let rows = rows.filter(|value| *value > 0).unwrap_or(DEFAULT_ROWS);
    let cols = cols.filter(|value| *value > 0).unwrap_or(DEFAULT_COLS);
    (rows.min(MAX_GRID_SIDE), cols.min(MAX_GRID_SIDE))
}

/// Cell count for a grid, or `None` when a side exceeds [`MAX_GRID_SIDE`].
pub fn cell_count(rows: usize, cols: usize) -> Option<usize> {
    if rows > MAX_GRID_SIDE || cols > MAX_GRID_SIDE {
        return None;
    }
    rows.checked_mul(cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_grid_is_empty() {
        let (pieces, grid) = generate(0, 4, 1);
        assert!(pieces.is_empty());
        assert!(grid.is_empty());
    }

    #[test]
    fn missing_dimensions_fall_back_to_three() {
        assert_eq!(grid_or_default(None, Some(5)), (3, 5));
        assert_eq!(grid_or_default(Some(0), None), (3, 3));
        assert_eq!(grid_or_default(Some(2), Some(4)), (2, 4));
    }

    #[test]
    fn huge_dimensions_are_capped() {
        assert_eq!(
            grid_or_default(Some(70_000), Some(70_000)),
            (MAX_GRID_SIDE, MAX_GRID_SIDE)
        );
        assert_eq!(cell_count(MAX_GRID_SIDE, MAX_GRID_SIDE), Some(4096));
        assert_eq!(cell_count(70_000, 70_000), None);
        let (pieces, grid) = generate(70_000, 2, 1);
        assert_eq!(pieces.len(), MAX_GRID_SIDE * 2);
        assert_eq!(grid.len(), MAX_GRID_SIDE * 2);
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, 99);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }
}
