//! Error types for the quote API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quote_export::ExportError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Too many login attempts. Please try again later.")]
    Throttled,

    #[error("Server configuration error: {0}")]
    Misconfigured(&'static str),

    #[error("Email delivery is not configured")]
    EmailUnavailable,

    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("Export timed out after {0}ms")]
    ExportTimeout(u64),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Timeout(ms) => ApiError::ExportTimeout(ms),
            ExportError::EmailDeliveryFailed(detail) => ApiError::EmailDelivery(detail),
            other => ApiError::Export(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::InvalidPassword => {
                (StatusCode::UNAUTHORIZED, "Invalid password".to_string())
            }
            ApiError::Throttled => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many login attempts. Please try again later.".to_string(),
            ),
            ApiError::Misconfigured(what) => {
                tracing::error!("server misconfigured: {}", what);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            ApiError::EmailUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Email delivery is not configured".to_string(),
            ),
            ApiError::EmailDelivery(detail) => {
                tracing::error!("email delivery failed: {}", detail);
                (StatusCode::BAD_GATEWAY, "Failed to send email".to_string())
            }
            ApiError::ExportTimeout(ms) => (
                StatusCode::GATEWAY_TIMEOUT,
                format!("Export timed out after {}ms", ms),
            ),
            ApiError::Export(detail) => {
                tracing::error!("export failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to export quote".to_string(),
                )
            }
            ApiError::Database(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Store(e) => {
                tracing::error!("storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
