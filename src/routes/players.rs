use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::AppState;
use crate::db;
use crate::error::ApiError;
use crate::models::{Player, PlayerPayload};

// GET /players - List all players
pub async fn get_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = db::get_all_players(&state.pool).await?;

    Ok(Json(players))
}

// GET /players/:id - Get player by ID
pub async fn get_player_by_id(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = db::get_player_by_id(&state.pool, &player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(player))
}

// POST /players - Create a player with a fresh id
pub async fn create_player(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Player>, ApiError> {
    let payload = PlayerPayload::decode(&body, state.body_mode)?;
    let player = Player::from_payload(Uuid::new_v4().to_string(), payload);

    db::insert_player(&state.pool, &player).await?;
    tracing::info!(player_id = %player.id, "created player");

    Ok(Json(player))
}

// PUT /players/:id - Overlay the body onto an existing player
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    body: Bytes,
) -> Result<Json<Player>, ApiError> {
    // Existence check happens before any write
    let mut player = db::get_player_by_id(&state.pool, &player_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let payload = PlayerPayload::decode(&body, state.body_mode)?;
    player.apply(payload);

    db::update_player(&state.pool, &player).await?;

    Ok(Json(player))
}

// DELETE /players/:id - Remove a player; unknown ids still succeed
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = db::delete_player(&state.pool, &player_id).await?;
    tracing::info!(player_id = %player_id, removed, "delete player");

    let mut body = Map::new();
    body.insert(format!("id #{player_id}"), Value::from("deleted"));

    Ok(Json(Value::Object(body)))
}
