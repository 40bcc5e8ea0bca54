use duopuzzle_core::{
    piece_background, GridLayout, Ignored, Piece, PuzzleSettings, Session, SliceRegion, SolutionStatus,
    Transition,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PieceView {
    pub id: u32,
    pub correct_position: usize,
    pub side: u8,
    pub is_placed: bool,
    pub pool_x: f32,
    pub pool_y: f32,
    pub z_index: u32,
    pub image: Option<String>,
    pub background_x: f32,
    pub background_y: f32,
    pub background_width: f32,
    pub background_height: f32,
}

impl PieceView {
    fn new(piece: &Piece, session: &Session, settings: &PuzzleSettings) -> Self {
        let background = piece_background(piece, session.rows(), session.cols());
        Self {
            id: piece.id.0,
            correct_position: piece.correct_position,
            side: piece.current_side.value(),
            is_placed: piece.is_placed,
            pool_x: piece.pool_x,
            pool_y: piece.pool_y,
            z_index: piece.z_index,
            image: settings.image_for(piece.current_side).map(str::to_string),
            background_x: background.x_percent,
            background_y: background.y_percent,
            background_width: background.width_percent,
            background_height: background.height_percent,
        }
    }
}

/// Everything the host needs to redraw the board and the pool.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StateView {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Option<u32>>,
    /// Unplaced pieces in presentation order.
    pub pool: Vec<u32>,
    pub pieces: Vec<PieceView>,
    pub locked: bool,
    pub status: &'static str,
    pub solved_side: Option<u8>,
    pub background_img: Option<String>,
}

impl StateView {
    pub(crate) fn new(session: &Session, settings: &PuzzleSettings, status: SolutionStatus) -> Self {
        let solved_side = match status {
            SolutionStatus::Open => None,
            SolutionStatus::Pending(side) | SolutionStatus::Confirmed(side) => Some(side.value()),
        };
        Self {
            rows: session.rows(),
            cols: session.cols(),
            cells: session.grid().slots().iter().map(|slot| slot.map(|id| id.0)).collect(),
            pool: session.pool_pieces().iter().map(|piece| piece.id.0).collect(),
            pieces: session
                .pieces()
                .iter()
                .map(|piece| PieceView::new(piece, session, settings))
                .collect(),
            locked: session.is_locked(),
            status: status_name(status),
            solved_side,
            background_img: settings.background_img.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegionView {
    pub part: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub stretch_x: bool,
    pub stretch_y: bool,
}

impl From<&SliceRegion> for RegionView {
    fn from(region: &SliceRegion) -> Self {
        Self {
            part: format!("{:?}", region.part),
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            stretch_x: region.stretch_x,
            stretch_y: region.stretch_y,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LayoutView {
    pub visible: bool,
    pub opacity: f32,
    pub cell_size: f32,
    pub grid_width: f32,
    pub grid_height: f32,
    pub outer_width: f32,
    pub outer_height: f32,
    pub frame_img: Option<String>,
    pub frame: Vec<RegionView>,
}

impl LayoutView {
    pub(crate) fn new(layout: &GridLayout, settings: &PuzzleSettings) -> Self {
        let (outer_width, outer_height) = layout.outer_size();
        Self {
            visible: layout.visible,
            opacity: layout.opacity(),
            cell_size: layout.cell_size,
            grid_width: layout.grid_width,
            grid_height: layout.grid_height,
            outer_width,
            outer_height,
            frame_img: settings.frame.as_ref().map(|frame| frame.image.clone()),
            frame: layout.frame_regions().iter().map(RegionView::from).collect(),
        }
    }
}

pub(crate) fn status_name(status: SolutionStatus) -> &'static str {
    match status {
        SolutionStatus::Open => "open",
        SolutionStatus::Pending(_) => "pending",
        SolutionStatus::Confirmed(_) => "confirmed",
    }
}

/// Short outcome name handed back from every gesture.
pub(crate) fn transition_name(transition: &Transition) -> &'static str {
    match transition {
        Transition::Ignored(Ignored::Locked) => "locked",
        Transition::Ignored(Ignored::UnknownPiece(_)) => "unknown-piece",
        Transition::Ignored(Ignored::CellOutOfRange(_)) => "out-of-range",
        Transition::Ignored(Ignored::Unchanged) => "unchanged",
        Transition::DragStarted { .. } => "drag-started",
        Transition::Placed { .. } => "placed",
        Transition::Pooled { .. } => "pooled",
        Transition::Flipped { .. } => "flipped",
        Transition::Raised { .. } => "raised",
        Transition::DragCancelled => "drag-cancelled",
    }
}
