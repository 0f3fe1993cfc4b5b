//! Aggressive moves: replaying the passive vector as a push
//!
//! For a candidate stone at `origin` and stored vector `V`:
//!
//! - `dest` is `origin + V`
//! - `before` is the tile one step short of `dest` (only for two-step vectors)
//! - `after` is the tile one step past `dest`
//!
//! The mover lands on `dest`. At most one opponent stone may sit on the path
//! (`before` or `dest`); it is pushed to `after`, or off the board when
//! `after` does not exist. A stone is never pushed into another stone.

use crate::board::{Board, BoardColor, Content, MoveVector, Pos, Stone, Tile, BOARD_COUNT};
use serde::{Deserialize, Serialize};

/// Which push-chain shape a legal aggressive move takes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggressiveKind {
    /// Path is clear, nothing is displaced
    Slide,
    /// Opponent stone on `dest` is pushed one step further
    Push,
    /// Opponent stone on `before` is pushed past the mover
    PushFromBehind,
}

/// A legal aggressive move on one board, ready to apply or preview
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggressivePlan {
    pub kind: AggressiveKind,
    pub mover: Stone,
    pub origin: Pos,
    pub dest: Pos,
    /// Tile the displaced stone left, if any
    pub pushed_from: Option<Pos>,
    /// Landing tile of the displaced stone, `None` when pushed off the board
    pub pushed_to: Option<Pos>,
}

impl AggressivePlan {
    /// Does this move drive an opponent stone off the board?
    pub fn captures(&self) -> bool {
        self.pushed_from.is_some() && self.pushed_to.is_none()
    }

    /// Tile writes this move performs, in application order
    pub fn changes(&self) -> Vec<(Pos, Content)> {
        let mut changes = vec![(self.origin, Content::Empty)];

        if let Some(from) = self.pushed_from {
            changes.push((from, Content::Empty));
        }
        if let (Some(_), Some(to)) = (self.pushed_from, self.pushed_to) {
            changes.push((to, Content::from(self.mover.opponent())));
        }
        changes.push((self.dest, Content::from(self.mover)));

        changes
    }

    /// New board with this move applied
    pub fn apply(&self, board: &Board) -> Board {
        board.with(&self.changes())
    }
}

/// May an aggressive move be played on `board_index` after a passive move on
/// a board of `passive_color`?
pub fn board_allowed(board_index: usize, passive_color: BoardColor) -> bool {
    board_index < BOARD_COUNT && BoardColor::of(board_index) != passive_color
}

/// Work out the aggressive move for the stone at `origin`, or `None` when it
/// is illegal.
pub fn plan_aggressive(
    board: &Board,
    origin: Pos,
    vector: MoveVector,
    mover: Stone,
) -> Option<AggressivePlan> {
    if !vector.is_valid() || !board.get(origin)?.holds(mover) {
        return None;
    }

    let opponent = mover.opponent();
    let dest = board.resolve_vector(origin, vector)?;

    let shorter = vector.resized(-1);
    let before = if shorter.is_zero() {
        None
    } else {
        board.resolve_vector(origin, shorter)
    };
    let after = board.resolve_vector(origin, vector.resized(1));

    let clear = |tile: Option<Tile>| tile.map_or(true, |t| t.content.is_empty());
    let after_pos = after.map(|t| t.pos());

    let plan = |kind: AggressiveKind, pushed_from: Option<Pos>| AggressivePlan {
        kind,
        mover,
        origin,
        dest: dest.pos(),
        pushed_from,
        pushed_to: if pushed_from.is_some() { after_pos } else { None },
    };

    match (before.map(|t| t.content.stone()), dest.content.stone()) {
        // Clear path
        (None | Some(None), None) => Some(plan(AggressiveKind::Slide, None)),

        // Single opponent stone on the landing tile
        (None | Some(None), Some(stone)) if stone == opponent && clear(after) => {
            Some(plan(AggressiveKind::Push, Some(dest.pos())))
        }

        // Single opponent stone passed over on the way
        (Some(Some(stone)), None) if stone == opponent && clear(after) => {
            Some(plan(AggressiveKind::PushFromBehind, before.map(|t| t.pos())))
        }

        // Own stones in the way, two stones in a row, or a push into a stone
        _ => None,
    }
}

/// Origins on `board` from which `mover` has a legal aggressive move
pub fn aggressive_origins(board: &Board, vector: MoveVector, mover: Stone) -> Vec<Pos> {
    Pos::all()
        .filter(|&pos| plan_aggressive(board, pos, vector, mover).is_some())
        .collect()
}
