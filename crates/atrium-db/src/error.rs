//! # Store Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//!   SQLite error (sqlx::Error)
//!        |
//!        v
//!   StoreError (this module)  - adds context and categorization,
//!        |                      carries the engine's business errors
//!        v
//!   ApiError (HTTP app)       - status code + JSON body
//! ```
//!
//! The two business variants (`ItemNotFound`, `InsufficientStock`) can
//! only arise inside the bill-creation transaction; when either is
//! returned, the transaction has been rolled back and no write is
//! visible.

use thiserror::Error;

use atrium_core::ValidationError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found (ledger reads and updates).
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A requested bill line referenced an id the catalog doesn't have.
    /// The whole sale is aborted.
    #[error("Item {id} not found")]
    ItemNotFound { id: i64 },

    /// A requested bill line asked for more than is on hand. The whole
    /// sale is aborted; `available` is the stock at validation time.
    #[error("Insufficient stock for {name}. Available: {available}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Input failed validation before any write.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
