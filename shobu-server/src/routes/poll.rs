//! Turn notification long-poll
//!
//! Clients pass the last version they saw and are woken as soon as another
//! participant commits a move or starts a rematch. On `reload` they fetch
//! the game again.

use crate::error::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct PollParams {
    pub version: Option<u64>,
}

#[derive(Serialize)]
pub struct PollResponse {
    pub reload: bool,
    pub version: u64,
}

/// Long-poll for a newer version of a game
pub async fn poll_game(
    State(state): State<Arc<ServerState>>,
    Path(namespace): Path<String>,
    Query(params): Query<PollParams>,
) -> Result<Json<PollResponse>, ApiError> {
    let client_version = params.version.unwrap_or(0);

    for _ in 0..state.poll_attempts {
        let version = state.version(&namespace)?;
        if version != client_version {
            return Ok(Json(PollResponse {
                reload: true,
                version,
            }));
        }
        tokio::time::sleep(state.poll_interval).await;
    }

    Ok(Json(PollResponse {
        reload: false,
        version: state.version(&namespace)?,
    }))
}
