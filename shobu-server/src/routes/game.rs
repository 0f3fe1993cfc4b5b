//! Game API endpoints: create, load, commit and rematch

use crate::error::ApiError;
use crate::registry::GameView;
use crate::state::ServerState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shobu_core::{AllBoards, Role, Stone};
use std::sync::Arc;

/// Game snapshot as sent to a participant
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub role: Role,
    pub current_turn: Stone,
    pub boards: AllBoards,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Stone>,
}

impl From<GameView> for GameResponse {
    fn from(view: GameView) -> Self {
        Self {
            role: view.role,
            current_turn: view.state.current_turn,
            boards: view.state.boards,
            version: view.version,
            winner: view.state.winner(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub namespace: String,
    pub current_turn: Stone,
    pub boards: AllBoards,
}

/// Create a game under a fresh room code
pub async fn create_game(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<CreateResponse>, ApiError> {
    let (namespace, game) = state.create_game()?;
    Ok(Json(CreateResponse {
        namespace,
        current_turn: game.current_turn,
        boards: game.boards,
    }))
}

#[derive(Deserialize)]
pub struct LoadParams {
    pub player_id: Option<String>,
}

/// Load a game and the caller's role in it
pub async fn load_game(
    State(state): State<Arc<ServerState>>,
    Path(namespace): Path<String>,
    Query(params): Query<LoadParams>,
) -> Result<Json<GameResponse>, ApiError> {
    let view = state.load_game(&namespace, params.player_id.as_deref())?;
    Ok(Json(view.into()))
}

/// Commit request: the full snapshot after a completed turn
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_id: String,
    pub boards: Value,
    pub current_turn: String,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub success: bool,
    pub version: u64,
}

/// Store the snapshot of a completed turn
pub async fn commit_move(
    State(state): State<Arc<ServerState>>,
    Path(namespace): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let version = state.commit_move(&namespace, &req.player_id, req.boards, &req.current_turn)?;
    Ok(Json(MoveResponse {
        success: true,
        version,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RematchRequest {
    pub player_id: String,
}

/// Reset the game for another round
pub async fn start_rematch(
    State(state): State<Arc<ServerState>>,
    Path(namespace): Path<String>,
    Json(req): Json<RematchRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let view = state.start_rematch(&namespace, &req.player_id)?;
    Ok(Json(view.into()))
}
