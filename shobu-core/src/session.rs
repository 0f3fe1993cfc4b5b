//! Game session: the turn state machine and the façade callers drive
//!
//! A turn moves through `Idle -> Selected -> PendingAggressive -> Idle`.
//! `Selected` can fall back to `Idle` by clicking the stone again, and
//! `PendingAggressive` can fall back to `Idle` through undo. Once a board
//! loses all stones of one color the session is `Finished` until
//! `new_game`.
//!
//! The session owns its `GameState` but never edits boards in place: every
//! change swaps in a board set produced by the resolvers.

use crate::aggressive::{board_allowed, plan_aggressive, AggressivePlan};
use crate::board::{AllBoards, BoardColor, MoveVector, Pos, Stone, StoneCoordinates, BOARD_COUNT};
use crate::game::{GameState, Role};
use crate::overlay::Overlay;
use crate::passive::{apply_passive, can_select, passive_targets, undo_passive, PassiveMove};
use tracing::debug;

// ============================================================================
// TYPES
// ============================================================================

/// Where the current turn stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Passive phase, nothing selected
    Idle,
    /// Passive phase, a stone is selected and its targets are flagged
    Selected { stone: StoneCoordinates },
    /// Passive move played, waiting for the aggressive half
    PendingAggressive {
        passive: PassiveMove,
        /// Boards as they were before the passive move
        before: AllBoards,
    },
    /// A board has been cleared of one color
    Finished { winner: Stone },
}

/// Which half of the turn is being played
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePhase {
    Passive,
    Aggressive,
}

/// A completed turn, ready to send to the commit interface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commit {
    /// New authoritative snapshot (turn already flipped)
    pub state: GameState,
    pub winner: Option<Stone>,
    pub board_index: usize,
    pub plan: AggressivePlan,
}

/// Result of a click on a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected,
    Deselected,
    PassiveMoved,
    Committed(Commit),
}

// ============================================================================
// SESSION
// ============================================================================

/// One participant's local view of a game
#[derive(Clone, Debug)]
pub struct GameSession {
    state: GameState,
    phase: TurnPhase,
    overlay: Overlay,
    /// Role the registry last reported for this participant
    role: Option<Role>,
}

impl GameSession {
    /// New game from the canonical layout
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    /// Session over a loaded snapshot; starts in the passive phase, or
    /// finished if the snapshot already has a winner
    pub fn from_state(state: GameState) -> Self {
        let phase = match state.winner() {
            Some(winner) => TurnPhase::Finished { winner },
            None => TurnPhase::Idle,
        };
        Self {
            state,
            phase,
            overlay: Overlay::new(),
            role: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn boards(&self) -> &AllBoards {
        &self.state.boards
    }

    pub fn current_turn(&self) -> Stone {
        self.state.current_turn
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn move_phase(&self) -> MovePhase {
        match self.phase {
            TurnPhase::PendingAggressive { .. } => MovePhase::Aggressive,
            _ => MovePhase::Passive,
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn winner(&self) -> Option<Stone> {
        match self.phase {
            TurnPhase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<StoneCoordinates> {
        match self.phase {
            TurnPhase::Selected { stone } => Some(stone),
            TurnPhase::PendingAggressive { passive, .. } => Some(passive.origin),
            _ => None,
        }
    }

    pub fn pending_passive(&self) -> Option<&PassiveMove> {
        match &self.phase {
            TurnPhase::PendingAggressive { passive, .. } => Some(passive),
            _ => None,
        }
    }

    /// Stored vector of the pending passive move
    pub fn move_vector(&self) -> Option<MoveVector> {
        self.pending_passive().map(|passive| passive.vector)
    }

    /// Color of the board that hosted the pending passive move
    pub fn passive_board_color(&self) -> Option<BoardColor> {
        self.pending_passive().map(|passive| passive.board_color)
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Handle a click the way the board widget does: select, deselect,
    /// commit a passive move or commit an aggressive move depending on phase
    pub fn click(&mut self, at: StoneCoordinates) -> ClickOutcome {
        match self.phase {
            TurnPhase::Idle => {
                if self.select(at) {
                    ClickOutcome::Selected
                } else {
                    ClickOutcome::Ignored
                }
            }
            TurnPhase::Selected { stone } if stone == at => {
                self.deselect();
                ClickOutcome::Deselected
            }
            TurnPhase::Selected { .. } => {
                if self.passive_move(at) {
                    ClickOutcome::PassiveMoved
                } else {
                    ClickOutcome::Ignored
                }
            }
            TurnPhase::PendingAggressive { .. } => match self.aggressive_move(at) {
                Some(commit) => ClickOutcome::Committed(commit),
                None => ClickOutcome::Ignored,
            },
            TurnPhase::Finished { .. } => ClickOutcome::Ignored,
        }
    }

    // ========================================================================
    // PASSIVE PHASE
    // ========================================================================

    /// Select a stone of the player to move on one of their home boards
    /// and flag its passive targets
    pub fn select(&mut self, at: StoneCoordinates) -> bool {
        if self.phase != TurnPhase::Idle || !can_select(&self.state.boards, at, self.state.current_turn) {
            debug!(?at, phase = ?self.phase, "selection ignored");
            return false;
        }

        let Some(board) = self.state.boards.board(at.board_index) else {
            return false;
        };

        self.overlay.clear();
        self.overlay.mark_selected(at);
        for pos in passive_targets(board, at.pos) {
            self.overlay.mark_target(StoneCoordinates {
                board_index: at.board_index,
                pos,
            });
        }
        self.phase = TurnPhase::Selected { stone: at };
        true
    }

    /// Drop the current selection and its targets
    pub fn deselect(&mut self) -> bool {
        if !matches!(self.phase, TurnPhase::Selected { .. }) {
            return false;
        }
        self.overlay.clear();
        self.phase = TurnPhase::Idle;
        true
    }

    /// Move the selected stone to `to`, which must be one of its flagged
    /// targets. Stores the vector and board color for the aggressive half.
    pub fn passive_move(&mut self, to: StoneCoordinates) -> bool {
        let TurnPhase::Selected { stone } = self.phase else {
            return false;
        };
        if to.board_index != stone.board_index || !self.overlay.get(to).passive_target {
            debug!(?stone, ?to, "passive move ignored");
            return false;
        }

        let before = self.state.boards;
        let Some((boards, passive)) = apply_passive(&before, stone, to.pos, self.state.current_turn) else {
            return false;
        };

        self.state.boards = boards;
        self.overlay.clear();
        self.phase = TurnPhase::PendingAggressive { passive, before };
        true
    }

    /// Take back the pending passive move
    pub fn undo(&mut self) -> bool {
        let TurnPhase::PendingAggressive { passive, before } = self.phase else {
            return false;
        };

        self.state.boards = undo_passive(&self.state.boards, &passive).unwrap_or(before);
        self.overlay.clear();
        self.phase = TurnPhase::Idle;
        true
    }

    /// The session lost focus: drop any preview and take back a pending
    /// passive move
    pub fn focus_lost(&mut self) {
        self.overlay.clear_previews();
        self.undo();
    }

    // ========================================================================
    // AGGRESSIVE PHASE
    // ========================================================================

    /// Aggressive move available from `at`, if any
    pub fn plan_for(&self, at: StoneCoordinates) -> Option<AggressivePlan> {
        let passive = self.pending_passive()?;
        if !board_allowed(at.board_index, passive.board_color) {
            return None;
        }
        let board = self.state.boards.board(at.board_index)?;
        plan_aggressive(board, at.pos, passive.vector, self.state.current_turn)
    }

    /// Every stone the player to move can use for the aggressive half
    pub fn legal_aggressive_origins(&self) -> Vec<StoneCoordinates> {
        (0..BOARD_COUNT)
            .flat_map(|board_index| {
                Pos::all().map(move |pos| StoneCoordinates { board_index, pos })
            })
            .filter(|&at| self.plan_for(at).is_some())
            .collect()
    }

    /// Preview the aggressive move from `at` without touching the boards.
    /// Any previous preview is cleared first.
    pub fn hover(&mut self, at: StoneCoordinates) -> bool {
        self.overlay.clear_previews();

        let Some(plan) = self.plan_for(at) else {
            return false;
        };
        for (pos, content) in plan.changes() {
            self.overlay.set_preview(
                StoneCoordinates {
                    board_index: at.board_index,
                    pos,
                },
                content,
            );
        }
        true
    }

    /// The pointer left the board
    pub fn clear_preview(&mut self) {
        self.overlay.clear_previews();
    }

    /// Play the aggressive half from `at`, flip the turn and check for a
    /// winner. Illegal candidates leave the session untouched.
    pub fn aggressive_move(&mut self, at: StoneCoordinates) -> Option<Commit> {
        let Some(plan) = self.plan_for(at) else {
            debug!(?at, phase = ?self.phase, "aggressive move ignored");
            return None;
        };
        let board = self.state.boards.board(at.board_index)?;

        let state = GameState {
            current_turn: self.state.current_turn.opponent(),
            boards: self.state.boards.replace(at.board_index, plan.apply(board)),
        };
        let winner = state.winner();

        self.state = state;
        self.overlay.clear();
        self.phase = match winner {
            Some(winner) => TurnPhase::Finished { winner },
            None => TurnPhase::Idle,
        };

        Some(Commit {
            state,
            winner,
            board_index: at.board_index,
            plan,
        })
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Reset to the canonical layout with Black to move
    pub fn new_game(&mut self) {
        let role = self.role;
        *self = Self::new();
        self.role = role;
    }

    /// Adopt a freshly fetched authoritative snapshot, along with the role
    /// the registry reported for this participant (`None` when unknown).
    ///
    /// Local changes are discarded only when the snapshot differs from what
    /// this session last agreed on: the boards before any pending passive
    /// move, the current turn, and the previously reported role. A role
    /// change covers a rematch that swapped colors while boards and turn
    /// stayed identical. Returns whether the local state was replaced.
    pub fn reconcile(&mut self, authoritative: GameState, role: Option<Role>) -> bool {
        let agreed_boards = match self.phase {
            TurnPhase::PendingAggressive { before, .. } => before,
            _ => self.state.boards,
        };
        let role_changed = matches!((self.role, role), (Some(held), Some(reported)) if held != reported);
        let role = role.or(self.role);

        if authoritative.boards == agreed_boards
            && authoritative.current_turn == self.state.current_turn
            && !role_changed
        {
            self.role = role;
            return false;
        }

        debug!(turn = ?authoritative.current_turn, ?role, "adopting authoritative snapshot");
        *self = Self::from_state(authoritative);
        self.role = role;
        true
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
