//! Passive moves: repositioning a stone on one of its owner's home boards
//!
//! A stone may step one or two tiles in any of the 8 directions. Every tile
//! it crosses or lands on must be empty, so an occupied neighbor blocks both
//! distances in that direction.

use crate::board::{
    is_home_board, AllBoards, BoardColor, Board, Content, MoveVector, Pos, Stone,
    StoneCoordinates, DIRECTIONS, MAX_STEP,
};
use serde::{Deserialize, Serialize};

/// A committed passive move, kept until the aggressive half is played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveMove {
    /// Tile the stone started on
    pub origin: StoneCoordinates,
    /// Realized displacement
    pub vector: MoveVector,
    /// Color of the board that hosted the move
    pub board_color: BoardColor,
    pub mover: Stone,
}

impl PassiveMove {
    /// Tile the stone landed on
    pub fn target(&self) -> Option<StoneCoordinates> {
        Some(StoneCoordinates {
            board_index: self.origin.board_index,
            pos: self.origin.pos.offset(self.vector)?,
        })
    }
}

/// Can `mover` start a passive move from `at`?
pub fn can_select(boards: &AllBoards, at: StoneCoordinates, mover: Stone) -> bool {
    at.is_valid()
        && is_home_board(mover, at.board_index)
        && boards.get(at).is_some_and(|content| content.holds(mover))
}

/// Empty tiles reachable from `origin` along unblocked rays of length 1 or 2
pub fn passive_targets(board: &Board, origin: Pos) -> Vec<Pos> {
    let mut targets = Vec::new();
    if !origin.is_valid() {
        return targets;
    }

    for direction in DIRECTIONS {
        for distance in 1..=MAX_STEP {
            match board.resolve_vector(origin, direction.scaled(distance)) {
                Some(tile) if tile.content == Content::Empty => targets.push(tile.pos()),
                _ => break, // Blocked or off the board
            }
        }
    }

    targets
}

/// Move the stone at `from` to `to` on the same board.
///
/// Returns the new board set and the move record, or `None` when the stone
/// does not belong to `mover`, the board is not one of `mover`'s home boards,
/// or `to` is not a legal target.
pub fn apply_passive(
    boards: &AllBoards,
    from: StoneCoordinates,
    to: Pos,
    mover: Stone,
) -> Option<(AllBoards, PassiveMove)> {
    if !can_select(boards, from, mover) {
        return None;
    }

    let board = boards.board(from.board_index)?;
    if !passive_targets(board, from.pos).contains(&to) {
        return None;
    }

    let next = board.with(&[(from.pos, Content::Empty), (to, Content::from(mover))]);
    let record = PassiveMove {
        origin: from,
        vector: MoveVector::between(from.pos, to),
        board_color: BoardColor::of(from.board_index),
        mover,
    };

    Some((boards.replace(from.board_index, next), record))
}

/// Reverse a passive move: the stone returns to its origin and the target
/// tile is cleared. Returns `None` when the board no longer matches the
/// move, e.g. after an aggressive move has already been played.
pub fn undo_passive(boards: &AllBoards, mv: &PassiveMove) -> Option<AllBoards> {
    let target = mv.target()?;
    let board = boards.board(mv.origin.board_index)?;

    if !board.get(target.pos)?.holds(mv.mover) || !board.get(mv.origin.pos)?.is_empty() {
        return None;
    }

    let restored = board.with(&[
        (mv.origin.pos, Content::from(mv.mover)),
        (target.pos, Content::Empty),
    ]);
    Some(boards.replace(mv.origin.board_index, restored))
}
