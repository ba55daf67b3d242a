//! # Starter Catalog Seeding
//!
//! Populates an empty catalog with the fixed starter items so a fresh
//! install has something to sell. Idempotent: a non-empty catalog
//! short-circuits, so restarting the server never duplicates rows.

use tracing::info;

use crate::error::StoreResult;
use crate::store::Store;
use atrium_core::{Money, NewItem};

/// The fixed starter catalog: five items across the categories a small
/// hospitality operation actually stocks.
fn starter_items() -> Vec<NewItem> {
    vec![
        NewItem {
            name: "Mineral Water (500ml)".to_string(),
            sku: Some("BEV-001".to_string()),
            category: "Beverages".to_string(),
            quantity: 100,
            price: Money::from_cents(250),
            min_quantity: 20,
            description: Some("Standard bottled water".to_string()),
        },
        NewItem {
            name: "Soda Can (Coke)".to_string(),
            sku: Some("BEV-002".to_string()),
            category: "Beverages".to_string(),
            quantity: 50,
            price: Money::from_cents(300),
            min_quantity: 10,
            description: Some("Chilled soda".to_string()),
        },
        NewItem {
            name: "Club Sandwich".to_string(),
            sku: Some("FOOD-001".to_string()),
            category: "Food".to_string(),
            quantity: 15,
            price: Money::from_cents(1200),
            min_quantity: 5,
            description: Some("Freshly made sandwich".to_string()),
        },
        NewItem {
            name: "Toiletries Kit".to_string(),
            sku: Some("AMEN-001".to_string()),
            category: "Amenities".to_string(),
            quantity: 200,
            price: Money::from_cents(500),
            min_quantity: 30,
            description: Some("Toothbrush, paste, soap".to_string()),
        },
        NewItem {
            name: "Spa Voucher (1hr)".to_string(),
            sku: Some("SVC-001".to_string()),
            category: "Services".to_string(),
            quantity: 999, // virtual stock
            price: Money::from_cents(8000),
            min_quantity: 0,
            description: Some("Access to spa services".to_string()),
        },
    ]
}

/// Seeds the starter catalog when - and only when - the catalog is
/// empty. Returns the number of items inserted (0 on the short-circuit).
pub async fn seed_starter_catalog(store: &dyn Store) -> StoreResult<usize> {
    let existing = store.get_items().await?;
    if !existing.is_empty() {
        info!(existing = existing.len(), "Catalog not empty, skipping seed");
        return Ok(0);
    }

    let items = starter_items();
    let count = items.len();
    for item in items {
        store.create_item(item).await?;
    }

    info!(count, "Seeded starter catalog");
    Ok(count)
}

// =============================================================================
// Unit Tests
// =============================================================================
