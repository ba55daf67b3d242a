//! # atrium-db: Database Layer for Atrium POS
//!
//! SQLite storage for the item catalog and bill history, using sqlx for
//! async operations.
//!
//! ## Data Flow
//! ```text
//!   HTTP handler
//!        |
//!        v
//!   Store trait (store.rs)        the capability interface
//!        |
//!        v
//!   Database (pool.rs)            SqlitePool, WAL mode, migrations
//!     ItemRepository              catalog CRUD
//!     BillRepository              atomic sale transaction + history
//!        |
//!        v
//!   SQLite: items / bills / bill_items
//! ```
//!
//! The one operation with multi-step consistency requirements is
//! [`repository::bill::BillRepository::create_bill`]; everything else
//! is single-statement. See that module for the transaction shape.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atrium_db::{Database, DbConfig, Store};
//!
//! let db = Database::new(DbConfig::new("./atrium.db")).await?;
//! let items = db.get_items().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use seed::seed_starter_catalog;
pub use store::Store;

pub use repository::bill::BillRepository;
pub use repository::item::ItemRepository;
