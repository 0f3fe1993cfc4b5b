//! API error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shobu_core::SnapshotError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("player does not hold a color in this game")]
    Unauthorized,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("game is already over")]
    GameOver,

    /// Stored snapshot failed to decode
    #[error("stored game is corrupt: {0}")]
    Integrity(#[from] SnapshotError),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::GameNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotYourTurn | ApiError::GameOver => StatusCode::CONFLICT,
            ApiError::Integrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Integrity(err) = &self {
            tracing::error!(error = %err, "data integrity failure");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
