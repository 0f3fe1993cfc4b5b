//! Player identity endpoint

use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub player_id: String,
}

/// Issue a fresh player identity. Clients keep it and send it back on
/// every load, commit and rematch.
pub async fn new_player() -> Json<PlayerResponse> {
    let player_id = Uuid::new_v4().to_string();
    tracing::debug!(%player_id, "player identity issued");
    Json(PlayerResponse { player_id })
}
