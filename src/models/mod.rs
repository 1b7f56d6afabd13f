use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A basketball player row from the `players` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    pub points: i64,
    pub assists: i64,
    pub rebounds: i64,
}

impl Player {
    /// New player from a request body. Any id in the body is discarded.
    pub fn from_payload(id: String, payload: PlayerPayload) -> Self {
        let mut player = Player {
            id,
            ..Default::default()
        };
        player.apply(payload);
        player
    }

    /// Overlay the fields present in `payload`. The id never changes.
    pub fn apply(&mut self, payload: PlayerPayload) {
        if let Some(name) = payload.name {
            self.name = name;
        }
        if let Some(team) = payload.team {
            self.team = team;
        }
        if let Some(points) = payload.points {
            self.points = points;
        }
        if let Some(assists) = payload.assists {
            self.assists = assists;
        }
        if let Some(rebounds) = payload.rebounds {
            self.rebounds = rebounds;
        }
    }
}

/// How request bodies are decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyMode {
    /// Invalid JSON and wrong-typed fields are treated as absent
    #[default]
    Lenient,
    /// Invalid JSON and wrong-typed fields are rejected with 400
    Strict,
}

/// Fields a client may send for create/update. `None` means absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPayload {
    pub name: Option<String>,
    pub team: Option<String>,
    pub points: Option<i64>,
    pub assists: Option<i64>,
    pub rebounds: Option<i64>,
}

impl PlayerPayload {
    pub fn decode(body: &[u8], mode: BodyMode) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return reject_or_default(mode, format!("expected a JSON object, got {other}"));
            }
            Err(err) => return reject_or_default(mode, format!("body is not valid JSON: {err}")),
        };

        // `id` is checked for type in strict mode but never used
        string_field(&fields, "id", mode)?;

        Ok(Self {
            name: string_field(&fields, "name", mode)?,
            team: string_field(&fields, "team", mode)?,
            points: int_field(&fields, "points", mode)?,
            assists: int_field(&fields, "assists", mode)?,
            rebounds: int_field(&fields, "rebounds", mode)?,
        })
    }
}

fn reject_or_default(mode: BodyMode, message: String) -> Result<PlayerPayload, ApiError> {
    match mode {
        BodyMode::Strict => Err(ApiError::BadRequest(message)),
        BodyMode::Lenient => {
            tracing::warn!("{message}; treating body as empty");
            Ok(PlayerPayload::default())
        }
    }
}

fn string_field(
    fields: &Map<String, Value>,
    key: &str,
    mode: BodyMode,
) -> Result<Option<String>, ApiError> {
    match fields.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => wrong_type(mode, key, "a string", other),
    }
}

fn int_field(
    fields: &Map<String, Value>,
    key: &str,
    mode: BodyMode,
) -> Result<Option<i64>, ApiError> {
    match fields.get(key).map(|v| (v, v.as_i64())) {
        None => Ok(None),
        Some((_, Some(n))) => Ok(Some(n)),
        Some((other, None)) => wrong_type(mode, key, "an integer", other),
    }
}

fn wrong_type<T>(mode: BodyMode, key: &str, expected: &str, got: &Value) -> Result<Option<T>, ApiError> {
    match mode {
        BodyMode::Strict => Err(ApiError::BadRequest(format!(
            "field `{key}` must be {expected}, got {got}"
        ))),
        BodyMode::Lenient => {
            tracing::warn!(field = key, "ignoring field with wrong type");
            Ok(None)
        }
    }
}
