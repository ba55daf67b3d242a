//! # Error Types
//!
//! Input-validation errors for atrium-core.
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, not manual impls
//! 2. Errors are enum variants with context fields, never bare strings
//! 3. Each variant maps to a user-facing message; the HTTP layer
//!    surfaces the first offending field's message as the 400 body

use thiserror::Error;

/// Input validation errors.
///
/// These occur when a request payload doesn't meet requirements. They
/// are always detected before any write happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a price string that is not a decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        allowed: Vec<&'static str>,
    },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
