//! SHOBU Server - HTTP game registry
//!
//! This crate provides the web backend:
//! - Player identities and room codes
//! - Game load with role assignment, move commits and rematches
//! - Long-poll turn notifications
//! - Static file serving for the board renderer

mod error;
mod registry;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub use error::ApiError;
pub use registry::{GameView, NAMESPACE_LEN};
pub use state::{GameRecord, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Delay between version checks while long-polling
    pub poll_interval_ms: u64,
    /// Version checks before a poll answers `reload: false`
    pub poll_attempts: u32,
    /// Fixed RNG seed for room codes and color draws
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "static".to_string(),
            poll_interval_ms: 100,
            poll_attempts: 50,
            seed: None,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        .route("/api/status", get(routes::status::status_handler))
        .route("/api/player", post(routes::player::new_player))
        // Game registry
        .route("/api/game", post(routes::game::create_game))
        .route("/api/game/{namespace}", get(routes::game::load_game))
        .route("/api/game/{namespace}/move", post(routes::game::commit_move))
        .route(
            "/api/game/{namespace}/rematch",
            post(routes::game::start_rematch),
        )
        .route("/api/game/{namespace}/poll", get(routes::poll::poll_game))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(&config));
    let router = create_router(&config, state);

    tracing::info!("SHOBU Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
