pub mod codec;
pub mod config;
pub mod generator;
pub mod geometry;
pub mod piece;
pub mod placement;
pub mod pool;
pub mod rng;
pub mod snapshot;
pub mod surface;
pub mod win;

pub use codec::{decode, encode, CodecError};
pub use config::{ConfigError, FrameSpec, PuzzleConfig, PuzzleSettings, Theme};
pub use generator::{generate, DEFAULT_COLS, DEFAULT_ROWS};
pub use geometry::{compute_grid_layout, FrameInsets, GridLayout, SlicePart, SliceRegion};
pub use piece::{piece_background, GridState, Piece, PieceBackground, PieceId, PieceIdError, Side};
pub use placement::{DragState, Ignored, Session, Transition};
pub use pool::{layout_pool, pool_fraction, PoolRect};
pub use snapshot::{SessionSnapshot, SnapshotError, SESSION_SNAPSHOT_VERSION};
pub use surface::{
    Gesture, Localizer, MessageKey, Point, PuzzleSurface, SolutionSink, SolutionStatus,
};
pub use win::evaluate;
