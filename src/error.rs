//! Application error taxonomy and its HTTP mapping.
//!
//! Errors serialize in the same `{status, result, cache_type}` shape as
//! successful lookups, so the wire contract has a single envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    result: Option<()>,
    cache_type: Option<()>,
}

/// Application-level errors, ordered roughly by where they arise.
#[derive(Debug)]
pub enum AppError {
    /// Caller supplied no usable address. Surfaced before any store or
    /// provider access.
    Validation { message: String },
    /// The provider call itself failed (transport, malformed payload).
    /// Never persisted; the address stays unresolved.
    Provider { message: String },
    /// A second outcome write for an already-resolved query. Recovered
    /// inside the orchestrator by re-reading the winning row; reaching the
    /// HTTP layer would be a bug.
    Conflict { message: String },
    /// Storage unavailable or another unexpected failure; fatal for the
    /// in-flight call.
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation { message } => write!(f, "validation error: {message}"),
            AppError::Provider { message } => write!(f, "provider error: {message}"),
            AppError::Conflict { message } => write!(f, "conflict: {message}"),
            AppError::Internal { message } => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (http_status, status) = match &self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Provider { .. } => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
            AppError::Conflict { .. } | AppError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        if http_status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            status,
            result: None,
            cache_type: None,
        };

        (http_status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict("unique constraint violation");
            }
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("database error")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(e.to_string())
    }
}
