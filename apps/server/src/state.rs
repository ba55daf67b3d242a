//! # Shared Application State
//!
//! Handlers receive the store as `Arc<dyn Store>` so they depend on the
//! capability interface, not on SQLite. The concrete `Database` handle
//! is kept alongside for plumbing that is inherently about the backing
//! store (health checks, shutdown).

use std::sync::Arc;

use atrium_db::{Database, Store};

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Concrete database handle (health checks, pool shutdown).
    pub db: Database,

    /// The capability interface everything else goes through.
    pub store: Arc<dyn Store>,
}

impl AppState {
    /// Builds the state around a connected database.
    pub fn new(db: Database) -> Self {
        let store: Arc<dyn Store> = Arc::new(db.clone());
        AppState { db, store }
    }
}
