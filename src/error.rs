use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const MISSING_FIELDS: &str = "Name and email are required";

#[derive(Debug)]
pub enum AppError {
    /// The client sent something it can fix.
    Validation(String),
    /// The store failed. `message` is what the client sees next to the
    /// underlying error text.
    Storage {
        message: &'static str,
        source: sqlx::Error,
    },
    Template(askama::Error),
}

impl AppError {
    /// For use with `map_err` on store calls.
    pub fn storage(message: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| AppError::Storage { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            AppError::Storage { message, source } => {
                tracing::error!("{message}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message, "error": source.to_string() })),
                )
                    .into_response()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}
