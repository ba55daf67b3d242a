//! # atrium-core: Pure Business Logic for Atrium POS
//!
//! This crate is the heart of Atrium POS. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//!   HTTP API (apps/server)
//!        |
//!        v
//!   atrium-core (THIS CRATE)
//!     types . money . validation . reports
//!     NO I/O - NO DATABASE - NO NETWORK
//!        |
//!        v
//!   atrium-db (SQLite storage, Store trait, transactions)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Bill, BillLine, requests)
//! - [`money`] - Integer-cent money with a decimal-string wire format
//! - [`error`] - Validation error types
//! - [`validation`] - Request validation into store-ready forms
//! - [`reports`] - Dashboard aggregation helpers
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output
//! 2. **No I/O**: database and network access are forbidden here
//! 3. **Integer money**: all monetary values are cents (i64), never floats
//! 4. **Explicit errors**: typed errors, never strings or panics

pub mod error;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

/// Reorder threshold applied when an item doesn't set one.
///
/// The catalog's insert path defaults `minQuantity` to this value, and
/// the low-stock report falls back to it for rows where the column is
/// null (e.g. seeded or externally written data).
pub const DEFAULT_MIN_QUANTITY: i64 = 5;
