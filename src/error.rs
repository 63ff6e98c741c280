//! # error
//!
//! Centralised application error type.
//!
//! Every fallible handler returns `Result<_, AppError>`.  Axum's
//! `IntoResponse` impl converts these into structured JSON error bodies so a
//! client always gets a machine-readable response even on failure.
//!
//! Quote API failures are *not* represented here — per the price-lookup
//! contract they are swallowed inside [`crate::quotes`] and surface as a
//! `0.0` live price instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The requested resource (e.g. a transaction id) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Catch-all for unexpected failures (database, chart rendering).
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {err}"),
            ),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
