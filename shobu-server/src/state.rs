//! Server state management
//!
//! Shared game registry, the RNG behind room codes and color draws, and
//! the long-poll timing.

use crate::ServerConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use shobu_core::snapshot::{encode_boards, encode_turn};
use shobu_core::{GameState, Role, SnapshotError, Stone};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// One stored game, in its persisted shape
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    /// 4 x 4 x 4 tile contents, decoded on every load
    pub boards: Value,
    pub current_turn: String,
    /// Identity holding Black, once assigned
    pub black: Option<String>,
    /// Identity holding White, once assigned
    pub white: Option<String>,
    /// Bumped on every accepted commit and rematch
    pub version: u64,
}

impl GameRecord {
    /// Fresh record holding the starting layout, no players yet
    pub fn new() -> Result<Self, SnapshotError> {
        let mut record = Self {
            boards: Value::Null,
            current_turn: String::new(),
            black: None,
            white: None,
            version: 0,
        };
        record.store(&GameState::new())?;
        Ok(record)
    }

    /// Decode the stored snapshot
    pub fn state(&self) -> Result<GameState, SnapshotError> {
        GameState::decode(self.boards.clone(), &self.current_turn)
    }

    /// Overwrite the stored snapshot
    pub fn store(&mut self, state: &GameState) -> Result<(), SnapshotError> {
        self.boards = encode_boards(&state.boards)?;
        self.current_turn = encode_turn(state.current_turn).to_string();
        Ok(())
    }

    /// Color already held by `player_id`
    pub fn role_of(&self, player_id: &str) -> Role {
        if self.black.as_deref() == Some(player_id) {
            Role::Black
        } else if self.white.as_deref() == Some(player_id) {
            Role::White
        } else {
            Role::Spectator
        }
    }

    pub fn seat(&mut self, stone: Stone) -> &mut Option<String> {
        match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
        }
    }
}

/// Server-wide shared state
pub struct ServerState {
    games: RwLock<HashMap<String, GameRecord>>,
    rng: Mutex<ChaCha8Rng>,
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl ServerState {
    pub fn new(config: &ServerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            games: RwLock::new(HashMap::new()),
            rng: Mutex::new(rng),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            poll_attempts: config.poll_attempts,
        }
    }

    // Records are only ever replaced whole; a poisoned lock still guards
    // consistent data.

    pub(crate) fn games(&self) -> RwLockReadGuard<'_, HashMap<String, GameRecord>> {
        self.games.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn games_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, GameRecord>> {
        self.games.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn rng(&self) -> MutexGuard<'_, ChaCha8Rng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a record directly, replacing any game under the same code
    pub fn insert_record(&self, namespace: &str, record: GameRecord) {
        self.games_mut().insert(namespace.to_string(), record);
    }

    pub fn record(&self, namespace: &str) -> Option<GameRecord> {
        self.games().get(namespace).cloned()
    }

    pub fn game_count(&self) -> usize {
        self.games().len()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}
