use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use crate::models::Player;

/// Open a pool on `database_url`, creating the database file if needed,
/// and make sure the `players` table exists.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create-if-absent only; existing rows are left alone.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS players (
               id       TEXT PRIMARY KEY NOT NULL,
               name     TEXT NOT NULL DEFAULT '',
               team     TEXT NOT NULL DEFAULT '',
               points   INTEGER NOT NULL DEFAULT 0,
               assists  INTEGER NOT NULL DEFAULT 0,
               rebounds INTEGER NOT NULL DEFAULT 0
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}

// Player queries
pub async fn get_all_players(pool: &SqlitePool) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT id, name, team, points, assists, rebounds FROM players ORDER BY rowid"#
    )
    .fetch_all(pool)
    .await
}

pub async fn get_player_by_id(pool: &SqlitePool, player_id: &str) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        r#"SELECT id, name, team, points, assists, rebounds FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(pool)
    .await
}

/// Plain insert: a duplicate id is a constraint error, not an upsert.
pub async fn insert_player(pool: &SqlitePool, player: &Player) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO players (id, name, team, points, assists, rebounds)
           VALUES (?, ?, ?, ?, ?, ?)"#
    )
    .bind(&player.id)
    .bind(&player.name)
    .bind(&player.team)
    .bind(player.points)
    .bind(player.assists)
    .bind(player.rebounds)
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrites every column but `id`. Updating a missing row is a silent
/// no-op, so callers check existence first.
pub async fn update_player(pool: &SqlitePool, player: &Player) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE players
           SET name = ?, team = ?, points = ?, assists = ?, rebounds = ?
           WHERE id = ?"#
    )
    .bind(&player.name)
    .bind(&player.team)
    .bind(player.points)
    .bind(player.assists)
    .bind(player.rebounds)
    .bind(&player.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns how many rows were removed (0 or 1). Zero is not an error.
pub async fn delete_player(pool: &SqlitePool, player_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
        .bind(player_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    // A single connection that never recycles, otherwise each new
    // connection would see its own empty in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    ensure_schema(&pool).await.unwrap();
    pool
}
