//! # Bill Repository
//!
//! The sale transaction engine and the bill history read path.
//!
//! ## Bill Creation
//! ```text
//!   validate lines (shape)                 no writes yet
//!        |
//!   BEGIN TRANSACTION
//!        |
//!   phase 1: read every requested item     one consistent snapshot
//!            check existence and stock     ItemNotFound / InsufficientStock
//!            price the sale in cents
//!        |
//!   phase 2: insert bill header
//!            insert snapshot lines
//!            guarded stock decrements      re-check: quantity >= requested
//!        |
//!   COMMIT                                 or rollback on any early return
//! ```
//!
//! The two-pass shape means a request touching the same item twice, or
//! items with interdependent stock, is judged against a single view
//! before anything mutates. The guarded `UPDATE ... AND quantity >= ?`
//! re-checks stock at write time, so even a writer that snuck between
//! the phases cannot drive a quantity negative - the sale aborts and
//! rolls back instead.

use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use atrium_core::validation::validate_requested_lines;
use atrium_core::{Bill, BillLine, BillWithLines, Item, Money, NewBill};

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Creates a bill from a validated sale request, atomically.
    ///
    /// Either the bill header, all of its snapshot lines, and every
    /// stock decrement are persisted together, or none of them are.
    ///
    /// ## Errors
    /// * `Validation` - empty line list or a non-positive quantity
    /// * `ItemNotFound` - a line references an id the catalog lacks
    /// * `InsufficientStock` - a line asks for more than is on hand
    pub async fn create_bill(&self, draft: NewBill) -> StoreResult<Bill> {
        validate_requested_lines(&draft.lines)?;

        let mut tx = self.pool.begin().await?;

        // Phase 1: validate every line against one consistent snapshot
        // and price the sale. Rows are kept for the snapshot inserts.
        let mut total = Money::zero();
        let mut checked: Vec<(Item, i64)> = Vec::with_capacity(draft.lines.len());

        for line in &draft.lines {
            let item = sqlx::query_as::<_, Item>(
                "SELECT id, name, sku, category, quantity, price_cents, min_quantity, description \
                 FROM items WHERE id = ?1",
            )
            .bind(line.item_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::ItemNotFound { id: line.item_id })?;

            if item.quantity < line.quantity {
                return Err(StoreError::InsufficientStock {
                    name: item.name,
                    available: item.quantity,
                    requested: line.quantity,
                });
            }

            total += item.price.multiply_quantity(line.quantity);
            checked.push((item, line.quantity));
        }

        // Phase 2: persist the header, the snapshot lines, and the
        // stock deductions.
        let created_at = Utc::now();

        let header = sqlx::query(
            r#"
            INSERT INTO bills (customer_name, payment_method, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&draft.customer_name)
        .bind(draft.payment_method)
        .bind(total)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;
        let bill_id = header.last_insert_rowid();

        for (item, quantity) in &checked {
            sqlx::query(
                r#"
                INSERT INTO bill_items (bill_id, item_id, item_name, quantity, price_at_time_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(bill_id)
            .bind(item.id)
            .bind(&item.name)
            .bind(*quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement: zero rows affected means the phase-1
            // read is stale (or the row vanished) - abort the sale.
            let deducted = sqlx::query(
                "UPDATE items SET quantity = quantity - ?2 WHERE id = ?1 AND quantity >= ?2",
            )
            .bind(item.id)
            .bind(*quantity)
            .execute(&mut *tx)
            .await?;

            if deducted.rows_affected() == 0 {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT quantity FROM items WHERE id = ?1")
                        .bind(item.id)
                        .fetch_optional(&mut *tx)
                        .await?;

                return Err(match available {
                    Some(available) => StoreError::InsufficientStock {
                        name: item.name.clone(),
                        available,
                        requested: *quantity,
                    },
                    None => StoreError::ItemNotFound { id: item.id },
                });
            }
        }

        tx.commit().await?;

        info!(
            bill_id,
            customer = %draft.customer_name,
            total = %total,
            lines = checked.len(),
            "Bill created"
        );

        Ok(Bill {
            id: bill_id,
            customer_name: draft.customer_name,
            payment_method: draft.payment_method,
            total_amount: total,
            created_at,
        })
    }

    /// Lists all bills newest-first, each with its owned lines.
    pub async fn list_with_lines(&self) -> StoreResult<Vec<BillWithLines>> {
        let bills = sqlx::query_as::<_, Bill>(
            "SELECT id, customer_name, payment_method, total_cents, created_at \
             FROM bills ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let lines = sqlx::query_as::<_, BillLine>(
            "SELECT id, bill_id, item_id, item_name, quantity, price_at_time_cents \
             FROM bill_items ORDER BY bill_id ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(bills = bills.len(), lines = lines.len(), "Loaded bill history");

        let mut by_bill: HashMap<i64, Vec<BillLine>> = HashMap::new();
        for line in lines {
            by_bill.entry(line.bill_id).or_default().push(line);
        }

        Ok(bills
            .into_iter()
            .map(|bill| {
                let items = by_bill.remove(&bill.id).unwrap_or_default();
                BillWithLines { bill, items }
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atrium_core::{ItemPatch, NewItem, PaymentMethod, RequestedLine};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn stock_item(db: &Database, name: &str, quantity: i64, price_cents: i64) -> Item {
        db.items()
            .insert(NewItem {
                name: name.to_string(),
                sku: None,
                category: "Beverages".to_string(),
                quantity,
                price: Money::from_cents(price_cents),
                min_quantity: 5,
                description: None,
            })
            .await
            .unwrap()
    }

    fn draft(lines: Vec<RequestedLine>) -> NewBill {
        NewBill {
            customer_name: "Room 204".to_string(),
            payment_method: PaymentMethod::Cash,
            lines,
        }
    }

    /// Snapshot of everything a failed sale must leave untouched.
    async fn store_state(db: &Database) -> (Vec<Item>, Vec<BillWithLines>) {
        (
            db.items().list().await.unwrap(),
            db.bills().list_with_lines().await.unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_bill_computes_total_and_deducts_stock() {
        let db = test_db().await;
        let item = stock_item(&db, "Mineral Water (500ml)", 10, 250).await;

        let bill = db
            .bills()
            .create_bill(draft(vec![RequestedLine {
                item_id: item.id,
                quantity: 3,
            }]))
            .await
            .unwrap();

        assert_eq!(bill.total_amount.to_string(), "7.50");
        assert_eq!(bill.customer_name, "Room 204");

        let after = db.items().get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, 7);

        let history = db.bills().list_with_lines().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].bill.id, bill.id);
        assert_eq!(history[0].items.len(), 1);
        assert_eq!(history[0].items[0].item_name, "Mineral Water (500ml)");
        assert_eq!(history[0].items[0].price_at_time.cents(), 250);
        assert_eq!(history[0].items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_create_bill_multiple_lines() {
        let db = test_db().await;
        let water = stock_item(&db, "Mineral Water (500ml)", 100, 250).await;
        let sandwich = stock_item(&db, "Club Sandwich", 15, 1200).await;

        let bill = db
            .bills()
            .create_bill(draft(vec![
                RequestedLine {
                    item_id: water.id,
                    quantity: 2,
                },
                RequestedLine {
                    item_id: sandwich.id,
                    quantity: 1,
                },
            ]))
            .await
            .unwrap();

        // 2 x 2.50 + 1 x 12.00
        assert_eq!(bill.total_amount.cents(), 1700);
        assert_eq!(
            db.items().get_by_id(water.id).await.unwrap().unwrap().quantity,
            98
        );
        assert_eq!(
            db.items()
                .get_by_id(sandwich.id)
                .await
                .unwrap()
                .unwrap()
                .quantity,
            14
        );
    }

    #[tokio::test]
    async fn test_insufficient_stock_aborts_whole_sale() {
        let db = test_db().await;
        let item = stock_item(&db, "Mineral Water (500ml)", 10, 250).await;
        let before = store_state(&db).await;

        let err = db
            .bills()
            .create_bill(draft(vec![RequestedLine {
                item_id: item.id,
                quantity: 11,
            }]))
            .await
            .unwrap_err();

        match err {
            StoreError::InsufficientStock {
                name,
                available,
                requested,
            } => {
                assert_eq!(name, "Mineral Water (500ml)");
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert_eq!(store_state(&db).await, before);
    }

    #[tokio::test]
    async fn test_failing_second_line_rolls_back_first() {
        let db = test_db().await;
        let water = stock_item(&db, "Mineral Water (500ml)", 100, 250).await;
        let sandwich = stock_item(&db, "Club Sandwich", 2, 1200).await;
        let before = store_state(&db).await;

        let err = db
            .bills()
            .create_bill(draft(vec![
                RequestedLine {
                    item_id: water.id,
                    quantity: 5,
                },
                RequestedLine {
                    item_id: sandwich.id,
                    quantity: 3, // only 2 on hand
                },
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InsufficientStock { .. }));
        // Nothing moved: no bill, no lines, no deduction of the water
        assert_eq!(store_state(&db).await, before);
    }

    #[tokio::test]
    async fn test_unknown_item_aborts_whole_sale() {
        let db = test_db().await;
        let water = stock_item(&db, "Mineral Water (500ml)", 100, 250).await;
        let before = store_state(&db).await;

        let err = db
            .bills()
            .create_bill(draft(vec![
                RequestedLine {
                    item_id: water.id,
                    quantity: 1,
                },
                RequestedLine {
                    item_id: 9999,
                    quantity: 1,
                },
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ItemNotFound { id: 9999 }));
        assert_eq!(store_state(&db).await, before);
    }

    #[tokio::test]
    async fn test_empty_line_list_is_rejected_without_writes() {
        let db = test_db().await;
        stock_item(&db, "Mineral Water (500ml)", 10, 250).await;
        let before = store_state(&db).await;

        let err = db.bills().create_bill(draft(vec![])).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store_state(&db).await, before);
    }

    #[tokio::test]
    async fn test_same_item_twice_is_judged_against_one_snapshot() {
        let db = test_db().await;
        let item = stock_item(&db, "Mineral Water (500ml)", 10, 250).await;

        // 6 + 6 = 12 > 10: phase 1 passes line one, but the guarded
        // decrement catches the second line before stock goes negative.
        let err = db
            .bills()
            .create_bill(draft(vec![
                RequestedLine {
                    item_id: item.id,
                    quantity: 6,
                },
                RequestedLine {
                    item_id: item.id,
                    quantity: 6,
                },
            ]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InsufficientStock { .. }));
        assert_eq!(
            db.items().get_by_id(item.id).await.unwrap().unwrap().quantity,
            10
        );

        // 5 + 5 = 10 fits exactly
        let bill = db
            .bills()
            .create_bill(draft(vec![
                RequestedLine {
                    item_id: item.id,
                    quantity: 5,
                },
                RequestedLine {
                    item_id: item.id,
                    quantity: 5,
                },
            ]))
            .await
            .unwrap();
        assert_eq!(bill.total_amount.cents(), 2500);
        assert_eq!(
            db.items().get_by_id(item.id).await.unwrap().unwrap().quantity,
            0
        );
    }

    #[tokio::test]
    async fn test_snapshots_survive_item_edits_and_deletion() {
        let db = test_db().await;
        let item = stock_item(&db, "Mineral Water (500ml)", 10, 250).await;

        let bill = db
            .bills()
            .create_bill(draft(vec![RequestedLine {
                item_id: item.id,
                quantity: 3,
            }]))
            .await
            .unwrap();

        // Rename and reprice the item, then delete it outright.
        db.items()
            .update(
                item.id,
                ItemPatch {
                    name: Some("Sparkling Water".to_string()),
                    price: Some(Money::from_cents(999)),
                    ..ItemPatch::default()
                },
            )
            .await
            .unwrap();
        db.items().delete(item.id).await.unwrap();

        let history = db.bills().list_with_lines().await.unwrap();
        assert_eq!(history[0].bill.total_amount, bill.total_amount);
        assert_eq!(history[0].items[0].item_name, "Mineral Water (500ml)");
        assert_eq!(history[0].items[0].price_at_time.cents(), 250);
    }

    #[tokio::test]
    async fn test_bills_list_newest_first() {
        let db = test_db().await;
        let item = stock_item(&db, "Mineral Water (500ml)", 100, 250).await;

        let first = db
            .bills()
            .create_bill(draft(vec![RequestedLine {
                item_id: item.id,
                quantity: 1,
            }]))
            .await
            .unwrap();
        let second = db
            .bills()
            .create_bill(draft(vec![RequestedLine {
                item_id: item.id,
                quantity: 2,
            }]))
            .await
            .unwrap();

        let history = db.bills().list_with_lines().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].bill.id, second.id);
        assert_eq!(history[1].bill.id, first.id);
    }

    #[tokio::test]
    async fn test_price_changes_before_sale_are_picked_up() {
        let db = test_db().await;
        let item = stock_item(&db, "Mineral Water (500ml)", 10, 250).await;

        db.items()
            .update(
                item.id,
                ItemPatch {
                    price: Some(Money::from_cents(300)),
                    ..ItemPatch::default()
                },
            )
            .await
            .unwrap();

        let bill = db
            .bills()
            .create_bill(draft(vec![RequestedLine {
                item_id: item.id,
                quantity: 2,
            }]))
            .await
            .unwrap();

        // Priced from the catalog at commit time, not from any cache
        assert_eq!(bill.total_amount.cents(), 600);
    }
}
