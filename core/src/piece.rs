use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    pub fn parse(value: &str) -> Result<Self, PieceIdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PieceIdError::Empty);
        }
        trimmed
            .parse::<u32>()
            .map(PieceId)
            .map_err(|_| PieceIdError::NotANumber {
                raw: trimmed.to_string(),
            })
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for PieceId {
    type Err = PieceIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieceIdError {
    Empty,
    NotANumber { raw: String },
}

impl fmt::Display for PieceIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceIdError::Empty => write!(f, "piece id payload is empty"),
            PieceIdError::NotANumber { raw } => write!(f, "piece id '{raw}' is not a number"),
        }
    }
}

impl std::error::Error for PieceIdError {}

/// The two faces of a piece. Each face shows its own image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn value(self) -> u8 {
        match self {
            Side::Front => 1,
            Side::Back => 2,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Side::Front),
            2 => Some(Side::Back),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub correct_position: usize,
    pub current_side: Side,
    pub is_placed: bool,
    pub pool_x: f32,
    pub pool_y: f32,
    pub z_index: u32,
}

impl Piece {
    pub fn new(index: usize, side: Side) -> Self {
        Self {
            id: PieceId(index as u32),
            correct_position: index,
            current_side: side,
            is_placed: false,
            pool_x: 0.0,
            pool_y: 0.0,
            z_index: 1,
        }
    }
}

/// Board occupancy: one slot per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
pub struct GridState {
    slots: Vec<Option<PieceId>>,
}

impl GridState {
    pub fn empty(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn from_slots(slots: Vec<Option<PieceId>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Option<PieceId>] {
        &self.slots
    }

    pub fn get(&self, cell: usize) -> Option<PieceId> {
        self.slots.get(cell).copied().flatten()
    }

    pub fn slot_of(&self, piece: PieceId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(piece))
    }

    pub fn is_full(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub(crate) fn set(&mut self, cell: usize, value: Option<PieceId>) {
        if let Some(slot) = self.slots.get_mut(cell) {
            *slot = value;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceBackground {
    pub side: Side,
    pub x_percent: f32,
    pub y_percent: f32,
    pub width_percent: f32,
    pub height_percent: f32,
}

/// Which slice of the side image a piece shows, as CSS-style background
/// position and size percentages.
pub fn piece_background(piece: &Piece, rows: usize, cols: usize) -> PieceBackground {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let row = piece.correct_position / cols;
    let col = piece.correct_position % cols;
    let x_percent = if cols > 1 {
        col as f32 * 100.0 / (cols - 1) as f32
    } else {
        0.0
    };
    let y_percent = if rows > 1 {
        row as f32 * 100.0 / (rows - 1) as f32
    } else {
        0.0
    };
    PieceBackground {
        side: piece.current_side,
        x_percent,
        y_percent,
        width_percent: cols as f32 * 100.0,
        height_percent: rows as f32 * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_id_parses_transfer_payloads() {
        assert_eq!(PieceId::parse(" 7 "), Ok(PieceId(7)));
        assert_eq!(PieceId::parse(""), Err(PieceIdError::Empty));
        assert!(matches!(
            "NaN".parse::<PieceId>(),
            Err(PieceIdError::NotANumber { .. })
        ));
        assert!(PieceId::parse("-1").is_err());
    }

    #[test]
    fn side_values_match_host_encoding() {
        assert_eq!(Side::Front.value(), 1);
        assert_eq!(Side::Back.value(), 2);
        assert_eq!(Side::from_value(2), Some(Side::Back));
        assert_eq!(Side::from_value(0), None);
        assert_eq!(Side::Front.toggled(), Side::Back);
    }

    #[test]
    fn background_covers_last_cell_at_full_offset() {
        let piece = Piece::new(8, Side::Back);
        let bg = piece_background(&piece, 3, 3);
        assert_eq!(bg.x_percent, 100.0);
        assert_eq!(bg.y_percent, 100.0);
        assert_eq!(bg.width_percent, 300.0);
        assert_eq!(bg.side, Side::Back);

        let single = piece_background(&Piece::new(0, Side::Front), 1, 1);
        assert_eq!(single.x_percent, 0.0);
        assert_eq!(single.y_percent, 0.0);
    }
}
