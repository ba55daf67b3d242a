//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Flow
//! ```text
//!   ValidationError (atrium-core)  -> 400, first offending field
//!   StoreError (atrium-db)
//!     NotFound                     -> 404 (ledger reads/updates)
//!     ItemNotFound                 -> 400 (business error on a sale)
//!     InsufficientStock            -> 400 (business error on a sale)
//!     everything else              -> 500, details logged not leaked
//! ```
//!
//! Every failure serializes as `{ "code": ..., "message": ... }` so the
//! caller always gets a distinguishable reason.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use atrium_core::ValidationError;
use atrium_db::StoreError;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling.
    pub code: ErrorCode,

    /// Human-readable message for display.
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404).
    NotFound,

    /// Input validation failed (400).
    ValidationError,

    /// A sale referenced an unknown item (400).
    BusinessRule,

    /// A sale asked for more stock than is on hand (400).
    InsufficientStock,

    /// Storage failure (500).
    DatabaseError,

    /// Anything else (500).
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError
            | ErrorCode::BusinessRule
            | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
///
/// The two sale business errors keep their full message (item name,
/// available stock); infrastructure failures are logged and replaced
/// with a generic message.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            StoreError::ItemNotFound { .. } => ApiError::new(ErrorCode::BusinessRule, err.to_string()),
            StoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            StoreError::Validation(e) => ApiError::validation(e.to_string()),
            StoreError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            StoreError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            StoreError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}
