//! Game registry operations: create, load, commit, rematch
//!
//! These are the collaborators the rules engine expects from outside. The
//! registry stores snapshots and enforces who may write them; it does not
//! replay moves.

use crate::error::ApiError;
use crate::state::{GameRecord, ServerState};
use rand::Rng;
use serde_json::Value;
use shobu_core::snapshot::{decode_boards, decode_turn, encode_turn};
use shobu_core::{GameState, Role, Stone};
use tracing::{info, warn};

/// Length of a room code
pub const NAMESPACE_LEN: usize = 6;

const NAMESPACE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// What a participant sees when loading a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameView {
    pub role: Role,
    pub state: GameState,
    pub version: u64,
}

impl ServerState {
    fn fresh_namespace(&self) -> String {
        let mut rng = self.rng();
        (0..NAMESPACE_LEN)
            .map(|_| char::from(NAMESPACE_ALPHABET[rng.gen_range(0..NAMESPACE_ALPHABET.len())]))
            .collect()
    }

    /// Create a game under a fresh room code
    pub fn create_game(&self) -> Result<(String, GameState), ApiError> {
        let record = GameRecord::new()?;
        let state = record.state()?;

        let mut games = self.games_mut();
        let namespace = loop {
            let candidate = self.fresh_namespace();
            if !games.contains_key(&candidate) {
                break candidate;
            }
        };
        games.insert(namespace.clone(), record);

        info!(%namespace, "game created");
        Ok((namespace, state))
    }

    /// Load a game, seating `player_id` if a color is still free.
    ///
    /// A returning identity keeps its color. The first newcomer gets a
    /// random color, the second the remaining one, everyone else watches.
    pub fn load_game(&self, namespace: &str, player_id: Option<&str>) -> Result<GameView, ApiError> {
        let mut games = self.games_mut();
        let record = games
            .get_mut(namespace)
            .ok_or_else(|| ApiError::GameNotFound(namespace.to_string()))?;
        let state = record.state()?;

        let role = match player_id {
            Some(id) => self.seat_player(namespace, record, id),
            None => Role::Spectator,
        };

        Ok(GameView {
            role,
            state,
            version: record.version,
        })
    }

    fn seat_player(&self, namespace: &str, record: &mut GameRecord, player_id: &str) -> Role {
        let held = record.role_of(player_id);
        if held != Role::Spectator {
            return held;
        }

        let stone = match (&record.black, &record.white) {
            (None, None) => {
                if self.rng().gen_bool(0.5) {
                    Stone::Black
                } else {
                    Stone::White
                }
            }
            (None, Some(_)) => Stone::Black,
            (Some(_), None) => Stone::White,
            (Some(_), Some(_)) => return Role::Spectator,
        };

        *record.seat(stone) = Some(player_id.to_string());
        info!(%namespace, player_id, color = ?stone, "player seated");
        Role::from(stone)
    }

    /// Store the snapshot produced by a completed turn.
    ///
    /// Only the player whose turn the stored snapshot records may commit,
    /// the submitted snapshot must pass the turn to the opponent, and a
    /// finished game accepts no further moves. Returns the new version.
    pub fn commit_move(
        &self,
        namespace: &str,
        player_id: &str,
        boards: Value,
        current_turn: &str,
    ) -> Result<u64, ApiError> {
        let submitted = GameState {
            boards: decode_boards(boards).map_err(|e| ApiError::BadRequest(e.to_string()))?,
            current_turn: decode_turn(current_turn).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        };

        let mut games = self.games_mut();
        let record = games
            .get_mut(namespace)
            .ok_or_else(|| ApiError::GameNotFound(namespace.to_string()))?;

        let Some(stone) = record.role_of(player_id).stone() else {
            warn!(%namespace, player_id, "commit from non-player rejected");
            return Err(ApiError::Unauthorized);
        };
        let stored = record.state()?;
        if let Some(winner) = stored.winner() {
            warn!(%namespace, player_id, ?winner, "commit after game end rejected");
            return Err(ApiError::GameOver);
        }
        if stored.current_turn != stone {
            warn!(%namespace, player_id, turn = ?stored.current_turn, "out-of-turn commit rejected");
            return Err(ApiError::NotYourTurn);
        }
        if submitted.current_turn != stone.opponent() {
            warn!(%namespace, player_id, "commit without turn handoff rejected");
            return Err(ApiError::BadRequest(format!(
                "a move by {} must hand the turn to {}",
                encode_turn(stone),
                encode_turn(stone.opponent())
            )));
        }

        record.store(&submitted)?;
        record.version += 1;

        info!(
            %namespace,
            player_id,
            version = record.version,
            winner = ?submitted.winner(),
            "move committed"
        );
        Ok(record.version)
    }

    /// Reset a game to the starting layout, swapping colors on a coin flip
    pub fn start_rematch(&self, namespace: &str, player_id: &str) -> Result<GameView, ApiError> {
        let mut games = self.games_mut();
        let record = games
            .get_mut(namespace)
            .ok_or_else(|| ApiError::GameNotFound(namespace.to_string()))?;

        if record.role_of(player_id) == Role::Spectator {
            warn!(%namespace, player_id, "rematch from non-player rejected");
            return Err(ApiError::Unauthorized);
        }

        let swapped = self.rng().gen_bool(0.5);
        if swapped {
            std::mem::swap(&mut record.black, &mut record.white);
        }

        let state = GameState::new();
        record.store(&state)?;
        record.version += 1;

        info!(%namespace, swapped, version = record.version, "rematch started");
        Ok(GameView {
            role: record.role_of(player_id),
            state,
            version: record.version,
        })
    }

    /// Current version of a game
    pub fn version(&self, namespace: &str) -> Result<u64, ApiError> {
        self.games()
            .get(namespace)
            .map(|record| record.version)
            .ok_or_else(|| ApiError::GameNotFound(namespace.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerConfig;
    use shobu_core::snapshot::encode_boards;
    use shobu_core::{AllBoards, Board, Content, Pos, StoneCoordinates};
    use serde_json::json;

    fn seeded(seed: u64) -> ServerState {
        ServerState::new(&ServerConfig {
            seed: Some(seed),
            ..ServerConfig::default()
        })
    }

    fn seated_game(state: &ServerState) -> (String, Role, Role) {
        let (namespace, _) = state.create_game().unwrap();
        let first = state.load_game(&namespace, Some("alice")).unwrap().role;
        let second = state.load_game(&namespace, Some("bob")).unwrap().role;
        (namespace, first, second)
    }

    fn player_for(state: &ServerState, namespace: &str, stone: Stone) -> String {
        let record = state.record(namespace).unwrap();
        match stone {
            Stone::Black => record.black.unwrap(),
            Stone::White => record.white.unwrap(),
        }
    }

    #[test]
    fn test_namespace_shape() {
        let state = seeded(1);
        let (namespace, game) = state.create_game().unwrap();
        assert_eq!(namespace.len(), NAMESPACE_LEN);
        assert!(namespace.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_namespaces_are_unique() {
        let state = seeded(2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let (namespace, _) = state.create_game().unwrap();
            assert!(seen.insert(namespace));
        }
    }

    #[test]
    fn test_two_players_get_opposite_colors() {
        for seed in 0..16 {
            let state = seeded(seed);
            let (namespace, first, second) = seated_game(&state);
            assert_ne!(first, Role::Spectator);
            assert_ne!(second, Role::Spectator);
            assert_ne!(first, second);

            let third = state.load_game(&namespace, Some("carol")).unwrap().role;
            assert_eq!(third, Role::Spectator);
        }
    }

    #[test]
    fn test_returning_player_keeps_color() {
        let state = seeded(3);
        let (namespace, first, second) = seated_game(&state);
        for _ in 0..3 {
            assert_eq!(state.load_game(&namespace, Some("alice")).unwrap().role, first);
            assert_eq!(state.load_game(&namespace, Some("bob")).unwrap().role, second);
        }
    }

    #[test]
    fn test_anonymous_load_is_spectator() {
        let state = seeded(4);
        let (namespace, _) = state.create_game().unwrap();
        assert_eq!(state.load_game(&namespace, None).unwrap().role, Role::Spectator);
        assert_eq!(state.record(&namespace).unwrap().black, None);
    }

    #[test]
    fn test_unknown_game() {
        let state = seeded(5);
        assert!(matches!(
            state.load_game("nope00", Some("alice")),
            Err(ApiError::GameNotFound(_))
        ));
        assert!(matches!(state.version("nope00"), Err(ApiError::GameNotFound(_))));
    }

    #[test]
    fn test_commit_checks_player_and_turn() {
        let state = seeded(6);
        let (namespace, _, _) = seated_game(&state);
        let black = player_for(&state, &namespace, Stone::Black);
        let white = player_for(&state, &namespace, Stone::White);

        let moved = AllBoards::starting().replace(
            1,
            *AllBoards::starting().board(0).unwrap(),
        );
        let boards = encode_boards(&moved).unwrap();

        assert!(matches!(
            state.commit_move(&namespace, "carol", boards.clone(), "white"),
            Err(ApiError::Unauthorized)
        ));
        assert!(matches!(
            state.commit_move(&namespace, &white, boards.clone(), "black"),
            Err(ApiError::NotYourTurn)
        ));

        let version = state.commit_move(&namespace, &black, boards, "white").unwrap();
        assert_eq!(version, 1);

        let view = state.load_game(&namespace, Some(&white)).unwrap();
        assert_eq!(view.state.current_turn, Stone::White);
        assert_eq!(view.state.boards, moved);
        assert_eq!(view.version, 1);

        // Black cannot go twice
        let again = encode_boards(&moved).unwrap();
        assert!(matches!(
            state.commit_move(&namespace, &black, again, "white"),
            Err(ApiError::NotYourTurn)
        ));
    }

    #[test]
    fn test_commit_must_hand_turn_to_opponent() {
        let state = seeded(12);
        let (namespace, _, _) = seated_game(&state);
        let black = player_for(&state, &namespace, Stone::Black);
        let white = player_for(&state, &namespace, Stone::White);

        for _ in 0..2 {
            let boards = encode_boards(&AllBoards::starting()).unwrap();
            assert!(matches!(
                state.commit_move(&namespace, &black, boards, "black"),
                Err(ApiError::BadRequest(_))
            ));
        }
        assert_eq!(state.version(&namespace).unwrap(), 0);

        // The turn still belongs to Black, White cannot jump in
        let boards = encode_boards(&AllBoards::starting()).unwrap();
        assert!(matches!(
            state.commit_move(&namespace, &white, boards, "black"),
            Err(ApiError::NotYourTurn)
        ));
    }

    #[test]
    fn test_commit_after_game_end_rejected() {
        let state = seeded(13);
        let (namespace, _, _) = seated_game(&state);
        let black = player_for(&state, &namespace, Stone::Black);
        let white = player_for(&state, &namespace, Stone::White);

        // Black clears White from board 1 and hands over the turn
        let light = Board::empty().with(&[(Pos::new(0, 3), Content::Black)]);
        let finished = AllBoards::starting().replace(1, light);
        let boards = encode_boards(&finished).unwrap();
        assert_eq!(state.commit_move(&namespace, &black, boards, "white").unwrap(), 1);

        let boards = encode_boards(&finished).unwrap();
        assert!(matches!(
            state.commit_move(&namespace, &white, boards, "black"),
            Err(ApiError::GameOver)
        ));
        assert_eq!(state.version(&namespace).unwrap(), 1);

        // A rematch reopens the game
        state.start_rematch(&namespace, &white).unwrap();
        let black = player_for(&state, &namespace, Stone::Black);
        let boards = encode_boards(&AllBoards::starting()).unwrap();
        assert!(state.commit_move(&namespace, &black, boards, "white").is_ok());
    }

    #[test]
    fn test_commit_rejects_malformed_snapshot() {
        let state = seeded(7);
        let (namespace, _, _) = seated_game(&state);
        let black = player_for(&state, &namespace, Stone::Black);

        assert!(matches!(
            state.commit_move(&namespace, &black, json!([[["empty"]]]), "white"),
            Err(ApiError::BadRequest(_))
        ));
        let boards = encode_boards(&AllBoards::starting()).unwrap();
        assert!(matches!(
            state.commit_move(&namespace, &black, boards, "spectator"),
            Err(ApiError::BadRequest(_))
        ));
        assert_eq!(state.version(&namespace).unwrap(), 0);
    }

    #[test]
    fn test_corrupt_record_surfaces_integrity_error() {
        let state = seeded(8);
        let (namespace, _) = state.create_game().unwrap();
        let mut record = state.record(&namespace).unwrap();
        record.boards[0][0][0] = json!("spectator");
        state.insert_record(&namespace, record);

        assert!(matches!(
            state.load_game(&namespace, Some("alice")),
            Err(ApiError::Integrity(_))
        ));
    }

    #[test]
    fn test_rematch_resets_and_keeps_both_players() {
        let state = seeded(9);
        let (namespace, _, _) = seated_game(&state);
        let black = player_for(&state, &namespace, Stone::Black);

        let mut record = state.record(&namespace).unwrap();
        let mut moved = GameState::new();
        moved.current_turn = Stone::White;
        moved.boards = moved.boards.replace(2, *moved.boards.board(0).unwrap());
        record.store(&moved).unwrap();
        state.insert_record(&namespace, record);

        let view = state.start_rematch(&namespace, &black).unwrap();
        assert_eq!(view.state, GameState::new());
        assert_eq!(view.version, 1);
        assert_ne!(view.role, Role::Spectator);

        let record = state.record(&namespace).unwrap();
        let mut players = [record.black.unwrap(), record.white.unwrap()];
        players.sort();
        assert_eq!(players, ["alice".to_string(), "bob".to_string()]);
        assert_eq!(
            state.load_game(&namespace, None).unwrap().state.boards.get(StoneCoordinates::new(2, 0, 3)),
            Some(shobu_core::Content::Black)
        );
    }

    #[test]
    fn test_rematch_swaps_colors_sometimes() {
        let state = seeded(10);
        let mut swaps = 0;
        for _ in 0..40 {
            let (namespace, first, _) = seated_game(&state);
            let view = state.start_rematch(&namespace, "alice").unwrap();
            if view.role != first {
                swaps += 1;
            }
        }
        assert!(swaps > 0 && swaps < 40);
    }

    #[test]
    fn test_rematch_requires_player() {
        let state = seeded(11);
        let (namespace, _, _) = seated_game(&state);
        assert!(matches!(
            state.start_rematch(&namespace, "carol"),
            Err(ApiError::Unauthorized)
        ));
        assert_eq!(state.version(&namespace).unwrap(), 0);
    }
}
