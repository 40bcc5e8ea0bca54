use tracing::{debug, trace};

use crate::generator::{generate, MAX_GRID_SIDE};
use crate::piece::{GridState, Piece, PieceId, Side};
use crate::pool::{layout_pool, pool_fraction, PoolRect, POOL_BASE_Z};
use crate::win::evaluate;

/// A drag in progress: the carried piece and the pointer's offset from the
/// piece's top-left corner at grab time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub piece: PieceId,
    pub offset: (f32, f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    Locked,
    UnknownPiece(PieceId),
    CellOutOfRange(usize),
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    Ignored(Ignored),
    DragStarted {
        piece: PieceId,
    },
    Placed {
        piece: PieceId,
        cell: usize,
        from: Option<usize>,
        swapped: Option<PieceId>,
        displaced: Option<PieceId>,
    },
    Pooled {
        piece: PieceId,
        from: Option<usize>,
        pool: (f32, f32),
    },
    Flipped {
        piece: PieceId,
        side: Side,
    },
    Raised {
        piece: PieceId,
        z_index: u32,
    },
    DragCancelled,
}

impl Transition {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Transition::Ignored(_))
    }

    /// Whether the board or a piece face changed, i.e. the win check must run.
    pub fn changes_board(&self) -> bool {
        matches!(
            self,
            Transition::Placed { .. } | Transition::Pooled { .. } | Transition::Flipped { .. }
        )
    }
}

/// One puzzle session: the piece set, board occupancy and stacking counter.
///
/// Replaced wholesale on reset; nothing carries over between sessions.
#[derive(Clone, Debug)]
pub struct Session {
    rows: usize,
    cols: usize,
    pieces: Vec<Piece>,
    pool_order: Vec<PieceId>,
    grid: GridState,
    max_z: u32,
    locked: bool,
    drag: Option<DragState>,
}

impl Session {
    pub fn new(rows: usize, cols: usize, seed: u32) -> Self {
        let rows = rows.min(MAX_GRID_SIDE);
        let cols = cols.min(MAX_GRID_SIDE);
        let (mut pieces, grid) = generate(rows, cols, seed);
        layout_pool(&mut pieces, seed);
        let pool_order = pieces.iter().map(|piece| piece.id).collect();
        pieces.sort_by_key(|piece| piece.id);
        debug!(rows, cols, seed, "puzzle: session generated");
        Self {
            rows,
            cols,
            pieces,
            pool_order,
            grid,
            max_z: POOL_BASE_Z,
            locked: false,
            drag: None,
        }
    }

    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        pieces: Vec<Piece>,
        pool_order: Vec<PieceId>,
        grid: GridState,
        max_z: u32,
        locked: bool,
    ) -> Self {
        Self {
            rows,
            cols,
            pieces,
            pool_order,
            grid,
            max_z,
            locked,
            drag: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Pieces indexed by id.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn pool_order(&self) -> &[PieceId] {
        &self.pool_order
    }

    /// Unplaced pieces in presentation order.
    pub fn pool_pieces(&self) -> Vec<&Piece> {
        self.pool_order
            .iter()
            .filter_map(|id| self.piece(*id))
            .filter(|piece| !piece.is_placed)
            .collect()
    }

    pub fn max_z(&self) -> u32 {
        self.max_z
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.drag = None;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn evaluate(&self) -> Option<Side> {
        evaluate(&self.pieces, &self.grid)
    }

    pub fn begin_drag(&mut self, piece: PieceId, offset: (f32, f32)) -> Transition {
        if let Some(ignored) = self.reject(piece) {
            return Transition::Ignored(ignored);
        }
        self.drag = Some(DragState { piece, offset });
        self.raise(piece);
        debug!(piece = piece.0, "puzzle: drag start");
        Transition::DragStarted { piece }
    }

    pub fn cancel_drag(&mut self) -> Transition {
        if self.drag.take().is_none() {
            return Transition::Ignored(Ignored::Unchanged);
        }
        trace!("puzzle: drag cancelled");
        Transition::DragCancelled
    }

    /// Drops `piece` on board cell `cell`.
    ///
    /// A piece arriving from another cell swaps with the cell's occupant. A
    /// piece arriving from the pool sends the occupant back to the pool at
    /// its last pool position.
    pub fn drop_on_cell(&mut self, piece: PieceId, cell: usize) -> Transition {
        if let Some(ignored) = self.reject(piece) {
            return Transition::Ignored(ignored);
        }
        self.drag = None;
        if cell >= self.grid.len() {
            trace!(piece = piece.0, cell, "puzzle: drop outside board");
            return Transition::Ignored(Ignored::CellOutOfRange(cell));
        }
        let from = self.grid.slot_of(piece);
        if from == Some(cell) {
            return Transition::Ignored(Ignored::Unchanged);
        }
        let target = self.grid.get(cell);
        if let Some(old) = from {
            self.grid.set(old, None);
        }
        self.grid.set(cell, Some(piece));
        let mut swapped = None;
        let mut displaced = None;
        if let Some(target) = target {
            match from {
                Some(old) => {
                    self.grid.set(old, Some(target));
                    swapped = Some(target);
                }
                None => {
                    if let Some(entry) = self.pieces.get_mut(target.index()) {
                        entry.is_placed = false;
                    }
                    self.raise(target);
                    displaced = Some(target);
                }
            }
        }
        if let Some(entry) = self.pieces.get_mut(piece.index()) {
            entry.is_placed = true;
        }
        debug!(
            piece = piece.0,
            cell,
            swapped = swapped.map(|id| id.0),
            displaced = displaced.map(|id| id.0),
            "puzzle: placed"
        );
        Transition::Placed {
            piece,
            cell,
            from,
            swapped,
            displaced,
        }
    }

    /// Drops `piece` on the pool surface at `pointer`, keeping the grab offset
    /// recorded when its drag started.
    pub fn drop_on_pool(&mut self, piece: PieceId, pointer: (f32, f32), rect: PoolRect) -> Transition {
        let offset = match self.drag {
            Some(drag) if drag.piece == piece => drag.offset,
            _ => (0.0, 0.0),
        };
        let fraction = pool_fraction(pointer, rect, offset);
        self.return_to_pool(piece, fraction)
    }

    /// Moves `piece` to the pool at an already computed fractional position.
    pub fn return_to_pool(&mut self, piece: PieceId, pool: (f32, f32)) -> Transition {
        if let Some(ignored) = self.reject(piece) {
            return Transition::Ignored(ignored);
        }
        self.drag = None;
        let from = self.grid.slot_of(piece);
        if let Some(old) = from {
            self.grid.set(old, None);
        }
        let pool = (pool.0.clamp(0.0, 1.0), pool.1.clamp(0.0, 1.0));
        if let Some(entry) = self.pieces.get_mut(piece.index()) {
            entry.is_placed = false;
            entry.pool_x = pool.0;
            entry.pool_y = pool.1;
        }
        self.raise(piece);
        debug!(piece = piece.0, from, x = pool.0, y = pool.1, "puzzle: returned to pool");
        Transition::Pooled { piece, from, pool }
    }

    pub fn toggle_side(&mut self, piece: PieceId) -> Transition {
        if let Some(ignored) = self.reject(piece) {
            return Transition::Ignored(ignored);
        }
        let side = match self.pieces.get_mut(piece.index()) {
            Some(entry) => {
                entry.current_side = entry.current_side.toggled();
                entry.current_side
            }
            None => return Transition::Ignored(Ignored::UnknownPiece(piece)),
        };
        self.raise(piece);
        debug!(piece = piece.0, side = side.value(), "puzzle: flipped");
        Transition::Flipped { piece, side }
    }

    pub fn hover(&mut self, piece: PieceId) -> Transition {
        if let Some(ignored) = self.reject(piece) {
            return Transition::Ignored(ignored);
        }
        match self.raise(piece) {
            Some(z_index) => Transition::Raised { piece, z_index },
            None => Transition::Ignored(Ignored::Unchanged),
        }
    }

    fn reject(&self, piece: PieceId) -> Option<Ignored> {
        if self.locked {
            trace!(piece = piece.0, "puzzle: gesture on locked puzzle");
            return Some(Ignored::Locked);
        }
        if self.piece(piece).is_none() {
            trace!(piece = piece.0, "puzzle: gesture on unknown piece");
            return Some(Ignored::UnknownPiece(piece));
        }
        None
    }

    fn is_front(&self, piece: PieceId) -> bool {
        let Some(entry) = self.piece(piece) else {
            return false;
        };
        entry.z_index == self.max_z
            && self
                .pieces
                .iter()
                .filter(|other| other.z_index == self.max_z)
                .count()
                == 1
    }

    /// Brings an unplaced piece to the top of the pool stack. The counter only
    /// grows when the piece is not already alone on top.
    fn raise(&mut self, piece: PieceId) -> Option<u32> {
        let placed = self.piece(piece).map(|entry| entry.is_placed).unwrap_or(true);
        if placed || self.is_front(piece) {
            return None;
        }
        self.max_z = self.max_z.saturating_add(1);
        let z_index = self.max_z;
        if let Some(entry) = self.pieces.get_mut(piece.index()) {
            entry.z_index = z_index;
        }
        Some(z_index)
    }
}
