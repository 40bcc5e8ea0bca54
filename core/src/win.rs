use crate::piece::{GridState, Piece, Side};

/// Solved when every cell is filled, every piece sits in its own cell, and all
/// pieces show the same face. Returns that face.
///
/// `pieces` is indexed by piece id.
pub fn evaluate(pieces: &[Piece], grid: &GridState) -> Option<Side> {
    if !grid.is_full() {
        return None;
    }
    let mut shared: Option<Side> = None;
    for (cell, slot) in grid.slots().iter().enumerate() {
        let piece = slot.and_then(|id| pieces.get(id.index()))?;
        if piece.correct_position != cell {
            return None;
        }
        match shared {
            None => shared = Some(piece.current_side),
            Some(side) if side != piece.current_side => return None,
            Some(_) => {}
        }
    }
    shared
}
