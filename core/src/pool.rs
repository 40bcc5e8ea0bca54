use crate::piece::Piece;
use crate::rng::{rand_range, JITTER_SALT};

pub const POOL_COLUMNS: usize = 2;
pub const POOL_ROWS: usize = 6;
pub const POOL_SLOTS: usize = POOL_COLUMNS * POOL_ROWS;
pub const POOL_COLUMN_X: [f32; POOL_COLUMNS] = [0.02, 0.48];
pub const POOL_ROW_STEP: f32 = 0.14;
pub const POOL_JITTER: f32 = 0.04;
pub const POOL_MAX_X: f32 = 0.55;
pub const POOL_MAX_Y: f32 = 0.80;
pub const POOL_BASE_Z: u32 = 1;

/// Container rectangle of the pool area in pointer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

pub fn pool_slot_base(index: usize) -> (f32, f32) {
    let slot = index % POOL_SLOTS;
    let col = slot % POOL_COLUMNS;
    let row = slot / POOL_COLUMNS;
    (POOL_COLUMN_X[col], row as f32 * POOL_ROW_STEP)
}

/// Scatters pieces over the pool in presentation order and resets their
/// stacking to the base layer. Runs once per generated puzzle.
pub fn layout_pool(pieces: &mut [Piece], seed: u32) {
    for (index, piece) in pieces.iter_mut().enumerate() {
        let (base_x, base_y) = pool_slot_base(index);
        let salt = JITTER_SALT.wrapping_add((index as u32) << 1);
        let jitter_x = rand_range(seed, salt, -POOL_JITTER, POOL_JITTER);
        let jitter_y = rand_range(seed, salt + 1, -POOL_JITTER, POOL_JITTER);
        piece.pool_x = (base_x + jitter_x).clamp(0.0, POOL_MAX_X);
        piece.pool_y = (base_y + jitter_y).clamp(0.0, POOL_MAX_Y);
        piece.z_index = POOL_BASE_Z;
    }
}

/// Where a dropped piece's top-left corner lands, as a fraction of the pool.
///
/// `offset` is the pointer-to-corner delta captured at drag start, so the
/// piece keeps its grab point instead of snapping its corner to the pointer.
pub fn pool_fraction(pointer: (f32, f32), rect: PoolRect, offset: (f32, f32)) -> (f32, f32) {
    let axis = |pos: f32, start: f32, extent: f32, grab: f32| {
        if extent.is_nan() || extent <= 0.0 {
            return 0.0;
        }
        let value = (pos - start - grab) / extent;
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        }
    };
    (
        axis(pointer.0, rect.left, rect.width, offset.0),
        axis(pointer.1, rect.top, rect.height, offset.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_wrap_after_twelve() {
        assert_eq!(pool_slot_base(0), (0.02, 0.0));
        assert_eq!(pool_slot_base(1), (0.48, 0.0));
        assert_eq!(pool_slot_base(3).1, POOL_ROW_STEP);
        assert_eq!(pool_slot_base(12), pool_slot_base(0));
        assert_eq!(pool_slot_base(13), pool_slot_base(1));
    }

    #[test]
    fn fraction_subtracts_grab_offset() {
        let rect = PoolRect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        };
        let (x, y) = pool_fraction((220.0, 110.0), rect, (20.0, 10.0));
        assert!((x - 0.5).abs() < 1e-6);
        assert!((y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn fraction_clamps_and_survives_empty_rect() {
        let rect = PoolRect {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        };
        assert_eq!(pool_fraction((-50.0, 500.0), rect, (0.0, 0.0)), (0.0, 1.0));
        let empty = PoolRect {
            width: 0.0,
            height: 0.0,
            ..rect
        };
        assert_eq!(pool_fraction((10.0, 10.0), empty, (0.0, 0.0)), (0.0, 0.0));
    }
}
