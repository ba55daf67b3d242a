//! # Store Capability Trait
//!
//! The narrow interface the rest of the system programs against. There
//! is a single concrete implementation today (`Database`, SQLite), but
//! everything above this trait - HTTP handlers, seeding, tests - only
//! sees the capability, so an alternate backing store can be swapped in
//! without touching engine callers.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::pool::Database;
use atrium_core::{Bill, BillWithLines, Item, ItemPatch, NewBill, NewItem};

/// Persistence capabilities of Atrium POS.
#[async_trait]
pub trait Store: Send + Sync {
    /// All items, ordered by name ascending.
    async fn get_items(&self) -> StoreResult<Vec<Item>>;

    /// A single item, or `None` when the id is unknown.
    async fn get_item(&self, id: i64) -> StoreResult<Option<Item>>;

    /// Persists a validated item and returns the stored row.
    async fn create_item(&self, item: NewItem) -> StoreResult<Item>;

    /// Merges a partial update onto an existing item.
    async fn update_item(&self, id: i64, patch: ItemPatch) -> StoreResult<Item>;

    /// Removes an item. Absent ids are a no-op.
    async fn delete_item(&self, id: i64) -> StoreResult<()>;

    /// All bills newest-first, each with its owned lines.
    async fn get_bills(&self) -> StoreResult<Vec<BillWithLines>>;

    /// Runs the atomic sale transaction and returns the persisted bill
    /// header.
    async fn create_bill(&self, draft: NewBill) -> StoreResult<Bill>;
}

#[async_trait]
impl Store for Database {
    async fn get_items(&self) -> StoreResult<Vec<Item>> {
        self.items().list().await
    }

    async fn get_item(&self, id: i64) -> StoreResult<Option<Item>> {
        self.items().get_by_id(id).await
    }

    async fn create_item(&self, item: NewItem) -> StoreResult<Item> {
        self.items().insert(item).await
    }

    async fn update_item(&self, id: i64, patch: ItemPatch) -> StoreResult<Item> {
        self.items().update(id, patch).await
    }

    async fn delete_item(&self, id: i64) -> StoreResult<()> {
        self.items().delete(id).await
    }

    async fn get_bills(&self) -> StoreResult<Vec<BillWithLines>> {
        self.bills().list_with_lines().await
    }

    async fn create_bill(&self, draft: NewBill) -> StoreResult<Bill> {
        self.bills().create_bill(draft).await
    }
}
