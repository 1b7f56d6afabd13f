use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // 404 and 500 carry no body; details stay in the server log
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::DatabaseError(err) => {
                tracing::error!(error = %err, "database operation failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::BadRequest(message) => {
                let status = StatusCode::BAD_REQUEST;
                let body = Json(ErrorResponse {
                    error: status.to_string(),
                    message,
                });

                (status, body).into_response()
            }
        }
    }
}
