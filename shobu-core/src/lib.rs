//! SHOBU Core - Rules engine
//!
//! This crate provides the core game logic for SHOBU:
//! - Board geometry (four 4x4 boards, tiles, move vectors)
//! - Passive move targets and application
//! - Aggressive move push-chain resolution
//! - Win detection
//! - Turn state machine and session façade
//! - Snapshot codec for the persisted game shape

pub mod board;
pub mod passive;
pub mod aggressive;
pub mod win;
pub mod game;
pub mod overlay;
pub mod session;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{
    AllBoards, Board, BoardColor, Content, MoveVector, Pos, Stone, StoneCoordinates, Tile,
    BOARD_COUNT, BOARD_SIZE, DIRECTIONS,
};
pub use passive::PassiveMove;
pub use aggressive::{AggressiveKind, AggressivePlan};
pub use win::find_winner;
pub use game::{GameState, Role};
pub use overlay::{Overlay, TileMarks};
pub use session::{ClickOutcome, Commit, GameSession, MovePhase, TurnPhase};
pub use snapshot::SnapshotError;
