use axum::{routing::get, Router};
use sqlx::sqlite::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::models::BodyMode;

pub mod health;
pub mod players;

/// Shared handler state: the database pool plus how bodies are decoded.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub body_mode: BodyMode,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { concat!("Basketball Players API - v", env!("CARGO_PKG_VERSION")) }))
        .route("/health", get(health::health_check))

        // Player endpoints
        .route("/players", get(players::get_players).post(players::create_player))
        .route(
            "/players/{id}",
            get(players::get_player_by_id)
                .put(players::update_player)
                .delete(players::delete_player),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
