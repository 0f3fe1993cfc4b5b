//! Snapshot codec for the persisted game shape
//!
//! ```json
//! { "currentTurn": "black", "boards": [[["white", ...], ...], ...] }
//! ```
//!
//! `boards` is exactly 4 x 4 x 4 tile contents, each one of `black`, `white`
//! or `empty`. Anything else is a data-integrity error and is never repaired.

use crate::board::{AllBoards, Stone};
use crate::game::GameState;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;

/// Failure to decode a persisted snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed boards: {0}")]
    Boards(#[source] serde_json::Error),

    #[error("invalid current turn: {0:?}")]
    Turn(String),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the boards column of a stored game
pub fn decode_boards(boards: Value) -> Result<AllBoards, SnapshotError> {
    serde_json::from_value(boards).map_err(SnapshotError::Boards)
}

/// Decode the turn column of a stored game (`spectator` is rejected)
pub fn decode_turn(turn: &str) -> Result<Stone, SnapshotError> {
    serde_json::from_value(Value::String(turn.to_string()))
        .map_err(|_| SnapshotError::Turn(turn.to_string()))
}

/// Encode boards as the nested content array
pub fn encode_boards(boards: &AllBoards) -> Result<Value, SnapshotError> {
    Ok(serde_json::to_value(boards)?)
}

/// Wire name of a stone color
pub fn encode_turn(turn: Stone) -> &'static str {
    match turn {
        Stone::Black => "black",
        Stone::White => "white",
    }
}

impl GameState {
    /// Rebuild a game from its stored columns
    pub fn decode(boards: Value, current_turn: &str) -> Result<Self, SnapshotError> {
        Ok(Self {
            current_turn: decode_turn(current_turn)?,
            boards: decode_boards(boards)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("decoding snapshot {}", path.display()))
    }

    /// Write a snapshot to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing snapshot {}", path.display()))
    }
}
