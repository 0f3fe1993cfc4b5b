//! Full-turn scenarios driven through the session façade

use shobu_core::{
    AggressiveKind, AllBoards, Board, ClickOutcome, Content, GameSession, GameState, MovePhase,
    MoveVector, Pos, Stone, StoneCoordinates, TurnPhase,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn at(board_index: usize, x: i8, y: i8) -> StoneCoordinates {
    StoneCoordinates::new(board_index, x, y)
}

fn board_with(stones: &[(i8, i8, Content)]) -> Board {
    let changes: Vec<_> = stones.iter().map(|&(x, y, c)| (Pos::new(x, y), c)).collect();
    Board::empty().with(&changes)
}

/// Black to move; board 2 has room for a (2,0) passive move from (0,3)
/// and board 1 holds a black stone lined up two steps behind a white one
fn push_setup(light_board: Board) -> GameState {
    let home = Board::starting().with(&[
        (Pos::new(1, 3), Content::Empty),
        (Pos::new(2, 3), Content::Empty),
    ]);
    GameState {
        current_turn: Stone::Black,
        boards: AllBoards::starting().replace(2, home).replace(1, light_board),
    }
}

fn play_passive(session: &mut GameSession) {
    assert_eq!(session.click(at(2, 0, 3)), ClickOutcome::Selected);
    assert_eq!(session.click(at(2, 2, 3)), ClickOutcome::PassiveMoved);
    assert_eq!(session.move_vector(), Some(MoveVector::new(2, 0)));
}

// ============================================================================
// PUSH CHAINS
// ============================================================================

#[test]
fn test_two_step_push_relocates_opponent() {
    let light = board_with(&[
        (0, 1, Content::Black),
        (2, 1, Content::White),
        (0, 3, Content::Black),
        (3, 0, Content::White),
    ]);
    let mut session = GameSession::from_state(push_setup(light));
    let stones_before = session.boards().stone_count();
    play_passive(&mut session);

    let ClickOutcome::Committed(commit) = session.click(at(1, 0, 1)) else {
        panic!("push should be legal");
    };
    assert_eq!(commit.plan.kind, AggressiveKind::Push);

    let boards = &commit.state.boards;
    assert_eq!(boards.get(at(1, 0, 1)), Some(Content::Empty));
    assert_eq!(boards.get(at(1, 1, 1)), Some(Content::Empty)); // before
    assert_eq!(boards.get(at(1, 2, 1)), Some(Content::Black)); // dest
    assert_eq!(boards.get(at(1, 3, 1)), Some(Content::White)); // after
    assert_eq!(boards.stone_count(), stones_before);
    assert_eq!(commit.state.current_turn, Stone::White);
    assert_eq!(commit.winner, None);
}

#[test]
fn test_push_from_behind_through_session() {
    let light = board_with(&[
        (0, 1, Content::Black),
        (1, 1, Content::White),
        (3, 3, Content::White),
    ]);
    let mut session = GameSession::from_state(push_setup(light));
    play_passive(&mut session);

    let commit = session.aggressive_move(at(1, 0, 1)).unwrap();
    assert_eq!(commit.plan.kind, AggressiveKind::PushFromBehind);
    let board = commit.state.boards.board(1).unwrap();
    assert_eq!(board.get(Pos::new(1, 1)), Some(Content::Empty));
    assert_eq!(board.get(Pos::new(2, 1)), Some(Content::Black));
    assert_eq!(board.get(Pos::new(3, 1)), Some(Content::White));
}

// ============================================================================
// WINNING AND RESTARTING
// ============================================================================

#[test]
fn test_push_off_last_stone_wins_and_locks_session() {
    let light = board_with(&[(1, 1, Content::Black), (3, 1, Content::White)]);
    let mut session = GameSession::from_state(push_setup(light));
    let stones_before = session.boards().stone_count();
    play_passive(&mut session);

    let commit = session.aggressive_move(at(1, 1, 1)).unwrap();
    assert!(commit.plan.captures());
    assert_eq!(commit.winner, Some(Stone::Black));
    assert_eq!(commit.state.boards.stone_count(), stones_before - 1);
    assert_eq!(session.phase(), &TurnPhase::Finished { winner: Stone::Black });

    // Nothing but a new game is accepted now
    let frozen = *session.state();
    assert_eq!(session.click(at(0, 0, 0)), ClickOutcome::Ignored);
    assert!(!session.select(at(0, 0, 0)));
    assert!(!session.undo());
    assert_eq!(session.state(), &frozen);

    session.new_game();
    assert_eq!(session.state(), &GameState::new());
    assert_eq!(session.phase(), &TurnPhase::Idle);
    assert_eq!(session.winner(), None);
}

#[test]
fn test_loaded_finished_game_starts_finished() {
    let light = board_with(&[(1, 1, Content::Black)]);
    let session = GameSession::from_state(push_setup(light));
    assert_eq!(session.winner(), Some(Stone::Black));
}

// ============================================================================
// TURN HANDOFF
// ============================================================================

#[test]
fn test_two_full_turns_alternate_players() {
    let mut session = GameSession::new();

    // Black: passive on board 3 (light), aggressive on board 0 (dark)
    session.click(at(3, 0, 3));
    session.click(at(3, 0, 2));
    assert!(matches!(session.click(at(0, 0, 3)), ClickOutcome::Committed(_)));
    assert_eq!(session.current_turn(), Stone::White);

    // Black stones are no longer selectable
    assert_eq!(session.click(at(2, 1, 3)), ClickOutcome::Ignored);

    // White: passive on board 0 (dark), aggressive on board 3 (light)
    assert_eq!(session.click(at(0, 3, 0)), ClickOutcome::Selected);
    assert_eq!(session.click(at(0, 3, 1)), ClickOutcome::PassiveMoved);
    assert_eq!(session.move_phase(), MovePhase::Aggressive);
    let ClickOutcome::Committed(commit) = session.click(at(3, 3, 0)) else {
        panic!("white slide should be legal");
    };
    assert_eq!(commit.state.current_turn, Stone::Black);
    assert_eq!(commit.state.boards.stone_count(), 32);
}

#[test]
fn test_undo_then_different_passive_move() {
    let mut session = GameSession::new();
    session.click(at(2, 1, 3));
    session.click(at(2, 1, 1));
    assert!(session.undo());
    assert_eq!(session.state(), &GameState::new());

    session.click(at(2, 2, 3));
    assert_eq!(session.click(at(2, 3, 2)), ClickOutcome::PassiveMoved);
    assert_eq!(session.move_vector(), Some(MoveVector::new(1, -1)));
}
