//! Error types for the service edges.
//!
//! The cart store itself is infallible; errors only arise while loading
//! configuration and the catalog, or from malformed requests.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub use crate::catalog::CatalogError;
pub use crate::config::ConfigError;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body could not be parsed.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::warn!(error = %self, status = %status, "request rejected");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
