use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

use crate::codec::{decode, encode};
use crate::generator::cell_count;
use crate::piece::{GridState, Piece, PieceId};
use crate::placement::Session;

pub const SESSION_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub rows: u32,
    pub cols: u32,
    pub pieces: Vec<Piece>,
    pub pool_order: Vec<PieceId>,
    pub grid: GridState,
    pub max_z: u32,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Encode,
    Decode,
    Dimensions { rows: u32, cols: u32 },
    VersionMismatch { expected: u32, found: u32 },
    PieceCount { expected: usize, found: usize },
    PieceOrder { index: usize },
    CorrectPosition { piece: u32 },
    GridLength { expected: usize, found: usize },
    GridPiece { cell: usize },
    PlacedFlag { piece: u32 },
    PoolOrder,
    ZIndex { piece: u32 },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Encode => write!(f, "session could not be encoded"),
            SnapshotError::Decode => write!(f, "snapshot bytes could not be decoded"),
            SnapshotError::Dimensions { rows, cols } => {
                write!(f, "snapshot grid {rows}x{cols} is out of range")
            }
            SnapshotError::VersionMismatch { expected, found } => {
                write!(f, "snapshot version {found} does not match {expected}")
            }
            SnapshotError::PieceCount { expected, found } => {
                write!(f, "snapshot has {found} pieces, grid needs {expected}")
            }
            SnapshotError::PieceOrder { index } => {
                write!(f, "piece at index {index} does not carry id {index}")
            }
            SnapshotError::CorrectPosition { piece } => {
                write!(f, "piece {piece} has a duplicate or out-of-range correct position")
            }
            SnapshotError::GridLength { expected, found } => {
                write!(f, "grid has {found} cells, expected {expected}")
            }
            SnapshotError::GridPiece { cell } => {
                write!(f, "cell {cell} holds an unknown or repeated piece")
            }
            SnapshotError::PlacedFlag { piece } => {
                write!(f, "piece {piece} placed flag disagrees with the grid")
            }
            SnapshotError::PoolOrder => write!(f, "pool order is not a permutation of the pieces"),
            SnapshotError::ZIndex { piece } => {
                write!(f, "piece {piece} is stacked above the session maximum")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl Session {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SESSION_SNAPSHOT_VERSION,
            rows: self.rows() as u32,
            cols: self.cols() as u32,
            pieces: self.pieces().to_vec(),
            pool_order: self.pool_order().to_vec(),
            grid: self.grid().clone(),
            max_z: self.max_z(),
            locked: self.is_locked(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        encode(&self.snapshot()).map_err(|_| SnapshotError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot = decode::<SessionSnapshot>(bytes).map_err(|_| SnapshotError::Decode)?;
        Self::from_snapshot(snapshot)
    }

    /// Rebuilds a session, refusing any snapshot that breaks piece or grid
    /// invariants.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SESSION_SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SESSION_SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        let rows = snapshot.rows as usize;
        let cols = snapshot.cols as usize;
        let total = cell_count(rows, cols).ok_or(SnapshotError::Dimensions {
            rows: snapshot.rows,
            cols: snapshot.cols,
        })?;
        if snapshot.pieces.len() != total {
            return Err(SnapshotError::PieceCount {
                expected: total,
                found: snapshot.pieces.len(),
            });
        }
        let mut position_seen = vec![false; total];
        for (index, piece) in snapshot.pieces.iter().enumerate() {
            if piece.id.index() != index {
                return Err(SnapshotError::PieceOrder { index });
            }
            let position = piece.correct_position;
            if position >= total || position_seen[position] {
                return Err(SnapshotError::CorrectPosition { piece: piece.id.0 });
            }
            position_seen[position] = true;
            if piece.z_index > snapshot.max_z {
                return Err(SnapshotError::ZIndex { piece: piece.id.0 });
            }
        }
        if snapshot.grid.len() != total {
            return Err(SnapshotError::GridLength {
                expected: total,
                found: snapshot.grid.len(),
            });
        }
        let mut on_grid = vec![false; total];
        for (cell, slot) in snapshot.grid.slots().iter().enumerate() {
            if let Some(id) = slot {
                let index = id.index();
                if index >= total || on_grid[index] {
                    return Err(SnapshotError::GridPiece { cell });
                }
                on_grid[index] = true;
            }
        }
        for piece in &snapshot.pieces {
            if piece.is_placed != on_grid[piece.id.index()] {
                return Err(SnapshotError::PlacedFlag { piece: piece.id.0 });
            }
        }
        let mut order_seen = vec![false; total];
        if snapshot.pool_order.len() != total {
            return Err(SnapshotError::PoolOrder);
        }
        for id in &snapshot.pool_order {
            let index = id.index();
            if index >= total || order_seen[index] {
                return Err(SnapshotError::PoolOrder);
            }
            order_seen[index] = true;
        }
        Ok(Session::from_parts(
            rows,
            cols,
            snapshot.pieces,
            snapshot.pool_order,
            snapshot.grid,
            snapshot.max_z,
            snapshot.locked,
        ))
    }
}
