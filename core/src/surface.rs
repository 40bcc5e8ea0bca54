use tracing::{debug, info};

use crate::config::PuzzleSettings;
use crate::geometry::{compute_grid_layout, GridLayout};
use crate::piece::{PieceId, Side};
use crate::placement::{Ignored, Session, Transition};
use crate::pool::PoolRect;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer gestures after the host adapter has resolved piece ids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    DragStart {
        piece: PieceId,
        pointer: Point,
        piece_origin: Point,
    },
    DragOver,
    DropOnCell {
        piece: PieceId,
        cell: usize,
    },
    DropOnPool {
        piece: PieceId,
        pointer: Point,
        pool: PoolRect,
    },
    DropOutside,
    Click {
        piece: PieceId,
    },
    HoverEnter {
        piece: PieceId,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKey {
    PiecesPool,
    Board,
    Message,
}

impl MessageKey {
    pub fn key(self) -> &'static str {
        match self {
            MessageKey::PiecesPool => "i.pieces",
            MessageKey::Board => "i.board",
            MessageKey::Message => "i.message",
        }
    }
}

pub trait Localizer {
    fn lookup(&self, key: &str) -> Option<String>;

    fn translate(&self, key: MessageKey) -> String {
        self.lookup(key.key())
            .unwrap_or_else(|| key.key().to_string())
    }
}

/// Receives the solved side. The host confirms or rejects it later through
/// [`PuzzleSurface::confirm_solution`].
pub trait SolutionSink {
    fn solution(&mut self, side: Side);

    fn win_sound(&mut self, _src: &str) {}
}

impl<F: FnMut(Side)> SolutionSink for F {
    fn solution(&mut self, side: Side) {
        self(side)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolutionStatus {
    Open,
    Pending(Side),
    Confirmed(Side),
}

pub struct PuzzleSurface<S> {
    settings: PuzzleSettings,
    session: Session,
    status: SolutionStatus,
    container: (f32, f32),
    layout: GridLayout,
    sink: S,
}

impl<S: SolutionSink> PuzzleSurface<S> {
    pub fn new(settings: PuzzleSettings, seed: u32, sink: S) -> Self {
        let session = Session::new(settings.rows, settings.cols, seed);
        let layout = GridLayout::hidden(settings.rows, settings.cols);
        Self {
            settings,
            session,
            status: SolutionStatus::Open,
            container: (0.0, 0.0),
            layout,
            sink,
        }
    }

    pub fn settings(&self) -> &PuzzleSettings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> SolutionStatus {
        self.status
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Starts over with a fresh piece set; lock and status are cleared.
    pub fn reset(&mut self, seed: u32) {
        self.session = Session::new(self.settings.rows, self.settings.cols, seed);
        self.status = SolutionStatus::Open;
        debug!(seed, "puzzle: reset");
    }

    /// Adopts a session restored by the host. A locked session that is still
    /// solved counts as already confirmed; anything else reopens.
    pub fn restore(&mut self, mut session: Session) -> bool {
        if session.rows() != self.settings.rows || session.cols() != self.settings.cols {
            return false;
        }
        self.status = match (session.is_locked(), session.evaluate()) {
            (true, Some(side)) => SolutionStatus::Confirmed(side),
            _ => {
                session.unlock();
                SolutionStatus::Open
            }
        };
        self.session = session;
        true
    }

    pub fn handle(&mut self, gesture: Gesture) -> Transition {
        let transition = match gesture {
            Gesture::DragStart {
                piece,
                pointer,
                piece_origin,
            } => self
                .session
                .begin_drag(piece, (pointer.x - piece_origin.x, pointer.y - piece_origin.y)),
            Gesture::DragOver => Transition::Ignored(Ignored::Unchanged),
            Gesture::DropOnCell { piece, cell } => self.session.drop_on_cell(piece, cell),
            Gesture::DropOnPool {
                piece,
                pointer,
                pool,
            } => self.session.drop_on_pool(piece, (pointer.x, pointer.y), pool),
            Gesture::DropOutside => self.session.cancel_drag(),
            Gesture::Click { piece } => self.session.toggle_side(piece),
            Gesture::HoverEnter { piece } => self.session.hover(piece),
        };
        if transition.changes_board() {
            self.check_solution();
        }
        transition
    }

    pub fn resize(&mut self, width: f32, height: f32) -> GridLayout {
        self.container = (width, height);
        self.layout = compute_grid_layout(
            width,
            height,
            self.settings.rows,
            self.settings.cols,
            self.settings.frame_insets(),
        );
        debug!(width, height, cell = self.layout.cell_size, "puzzle: layout");
        self.layout
    }

    pub fn container(&self) -> (f32, f32) {
        self.container
    }

    /// Host verdict on a pending solution. Acceptance keeps the lock and
    /// requests the win sound; rejection reopens the board as it stands.
    pub fn confirm_solution(&mut self, accepted: bool) -> SolutionStatus {
        if let SolutionStatus::Pending(side) = self.status {
            if accepted {
                self.status = SolutionStatus::Confirmed(side);
                info!(side = side.value(), "puzzle: solution confirmed");
                let sound = self.settings.win_audio.clone();
                self.sink.win_sound(&sound);
            } else {
                self.status = SolutionStatus::Open;
                self.session.unlock();
                info!(side = side.value(), "puzzle: solution rejected, unlocked");
            }
        }
        self.status
    }

    pub fn pool_label(&self, localizer: &dyn Localizer) -> String {
        localizer.translate(MessageKey::PiecesPool)
    }

    pub fn board_label(&self, localizer: &dyn Localizer) -> String {
        localizer.translate(MessageKey::Board)
    }

    fn check_solution(&mut self) {
        if self.status != SolutionStatus::Open {
            return;
        }
        if let Some(side) = self.session.evaluate() {
            self.status = SolutionStatus::Pending(side);
            self.session.lock();
            info!(side = side.value(), "puzzle: solved, reporting");
            self.sink.solution(side);
        }
    }
}
