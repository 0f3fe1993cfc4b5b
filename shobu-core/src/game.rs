//! Authoritative game state and player roles

use crate::board::{AllBoards, Stone};
use crate::win::find_winner;
use serde::{Deserialize, Serialize};

/// Role of a participant in a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Black,
    White,
    Spectator,
}

impl Role {
    /// Stone color this role plays, `None` for spectators
    pub fn stone(self) -> Option<Stone> {
        match self {
            Role::Black => Some(Stone::Black),
            Role::White => Some(Stone::White),
            Role::Spectator => None,
        }
    }
}

impl From<Stone> for Role {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Role::Black,
            Stone::White => Role::White,
        }
    }
}

/// The persisted and exchanged game snapshot.
///
/// Turn phase, selection and previews are session-local and never part of
/// this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_turn: Stone,
    pub boards: AllBoards,
}

impl GameState {
    /// Fresh game: canonical layout, Black to move
    pub fn new() -> Self {
        Self {
            current_turn: Stone::Black,
            boards: AllBoards::starting(),
        }
    }

    pub fn winner(&self) -> Option<Stone> {
        find_winner(&self.boards)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
