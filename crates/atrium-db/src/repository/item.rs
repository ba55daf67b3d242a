//! # Item Repository
//!
//! Database operations for the item catalog: the inventory ledger's
//! list/get/create/update/delete contract. Stock quantities only change
//! here through an explicit admin update; sale deductions happen inside
//! the bill transaction (`repository::bill`).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use atrium_core::{Item, ItemPatch, NewItem};

const ITEM_COLUMNS: &str =
    "id, name, sku, category, quantity, price_cents, min_quantity, description";

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists all items ordered by name ascending. No pagination; the
    /// catalog is small by design.
    pub async fn list(&self) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - item found
    /// * `Ok(None)` - no such id
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item and returns the persisted row.
    pub async fn insert(&self, item: NewItem) -> StoreResult<Item> {
        debug!(name = %item.name, category = %item.category, "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, sku, category, quantity, price_cents, min_quantity, description)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.name)
        .bind(&item.sku)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(item.price)
        .bind(item.min_quantity)
        .bind(&item.description)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name,
            sku: item.sku,
            category: item.category,
            quantity: item.quantity,
            price: item.price,
            min_quantity: Some(item.min_quantity),
            description: item.description,
        })
    }

    /// Merges a partial update onto an existing row.
    ///
    /// Fields absent from the patch are left untouched. Fails with
    /// NotFound when the id doesn't exist.
    pub async fn update(&self, id: i64, patch: ItemPatch) -> StoreResult<Item> {
        debug!(id, "Updating item");

        let existing = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("Item", id))?;

        let merged = patch.apply_to(existing);

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                sku = ?3,
                category = ?4,
                quantity = ?5,
                price_cents = ?6,
                min_quantity = ?7,
                description = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.sku)
        .bind(&merged.category)
        .bind(merged.quantity)
        .bind(merged.price)
        .bind(merged.min_quantity)
        .bind(&merged.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Item", id));
        }

        Ok(merged)
    }

    /// Deletes an item. Deleting an absent id is a no-op: historical
    /// bill lines keep their snapshots either way.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id, "Deleting item");

        sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts catalog rows (used by the seeding short-circuit).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atrium_core::Money;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn water() -> NewItem {
        NewItem {
            name: "Mineral Water (500ml)".to_string(),
            sku: Some("BEV-001".to_string()),
            category: "Beverages".to_string(),
            quantity: 100,
            price: Money::from_cents(250),
            min_quantity: 20,
            description: Some("Standard bottled water".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.items();

        let created = repo.insert(water()).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.price.cents(), 250);
        assert_eq!(fetched.min_quantity, Some(20));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.items().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let db = test_db().await;
        let repo = db.items();

        let mut sandwich = water();
        sandwich.name = "Club Sandwich".to_string();
        let mut soda = water();
        soda.name = "Soda Can (Coke)".to_string();

        repo.insert(soda).await.unwrap();
        repo.insert(water()).await.unwrap();
        repo.insert(sandwich).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Club Sandwich".to_string(),
                "Mineral Water (500ml)".to_string(),
                "Soda Can (Coke)".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let db = test_db().await;
        let repo = db.items();

        let created = repo.insert(water()).await.unwrap();

        let patch = ItemPatch {
            price: Some(Money::from_cents(300)),
            quantity: Some(90),
            ..ItemPatch::default()
        };
        let updated = repo.update(created.id, patch).await.unwrap();

        assert_eq!(updated.price.cents(), 300);
        assert_eq!(updated.quantity, 90);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.sku, created.sku);

        // Persisted, not just returned
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;
        let err = db
            .items()
            .update(999, ItemPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.items();

        let created = repo.insert(water()).await.unwrap();
        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());

        // Second delete of the same id is a quiet no-op
        repo.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = db.items();

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.insert(water()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
