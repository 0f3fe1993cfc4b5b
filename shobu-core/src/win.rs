//! Win detection
//!
//! A player wins as soon as any single board holds none of the opponent's
//! stones. Boards are scanned in index order and the first eliminated color
//! decides the game.

use crate::board::{AllBoards, Stone};

/// Winner of the position, if any board has lost all stones of one color
pub fn find_winner(boards: &AllBoards) -> Option<Stone> {
    for board in boards.iter() {
        if board.count(Stone::Black) == 0 {
            return Some(Stone::White);
        }
        if board.count(Stone::White) == 0 {
            return Some(Stone::Black);
        }
    }
    None
}
