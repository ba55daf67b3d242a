//! # Atrium POS HTTP Server
//!
//! A thin axum app over the Store capability trait:
//!
//! ```text
//!   /api/items       GET POST          the inventory ledger
//!   /api/items/{id}  GET PUT DELETE
//!   /api/bills       GET POST          sale transaction + history
//!   /api/dashboard   GET               server-side aggregates
//!   /health          GET
//! ```
//!
//! Handlers validate with atrium-core, call the store, and map errors
//! to status codes. Business logic lives below this crate.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;
