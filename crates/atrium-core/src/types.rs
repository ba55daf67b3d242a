//! # Domain Types
//!
//! Core domain types for Atrium POS.
//!
//! ## Type Hierarchy
//! ```text
//!   Item      - a sellable catalog entry with stock and price
//!   Bill      - an immutable record of a completed sale
//!   BillLine  - an immutable snapshot of one sold item within a bill
//! ```
//!
//! Rows carry `i64` ids assigned by the store. Wire names are camelCase.
//! The `*Input`/`*Request` types are what the HTTP layer deserializes;
//! the validated forms (`NewItem`, `ItemPatch`, `NewBill`) are what the
//! store accepts. The split keeps "anything the client may send" and
//! "anything the engine will act on" as different types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A sellable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned by the store.
    pub id: i64,

    /// Display name shown on the terminal and snapshotted into bills.
    pub name: String,

    /// Stock Keeping Unit - optional business identifier.
    pub sku: Option<String>,

    /// Category ("Beverages", "Food", ...).
    pub category: String,

    /// Current stock level. Never negative.
    pub quantity: i64,

    /// Unit price.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents"))]
    pub price: Money,

    /// Reorder threshold. Items at or below it show up as low stock.
    /// Treated as 5 when unset.
    pub min_quantity: Option<i64>,

    /// Optional free-form description.
    pub description: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// Accepted tender types. The wire strings are fixed: `"Cash"`,
/// `"Card"`, `"Room Charge"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum PaymentMethod {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Cash"))]
    Cash,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Card"))]
    Card,
    #[serde(rename = "Room Charge")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Room Charge"))]
    RoomCharge,
}

impl PaymentMethod {
    /// The accepted wire strings, used in validation error messages.
    pub const ALLOWED: [&'static str; 3] = ["Cash", "Card", "Room Charge"];

    /// Parses a wire string; `None` for anything outside the fixed set.
    pub fn parse(s: &str) -> Option<PaymentMethod> {
        match s {
            "Cash" => Some(PaymentMethod::Cash),
            "Card" => Some(PaymentMethod::Card),
            "Room Charge" => Some(PaymentMethod::RoomCharge),
            _ => None,
        }
    }

    /// The wire string for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::RoomCharge => "Room Charge",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A completed sale. Immutable once created: there is no update or
/// delete operation anywhere in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,

    pub customer_name: String,

    pub payment_method: PaymentMethod,

    /// Server-computed sum of line totals, never client-supplied.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "total_cents"))]
    pub total_amount: Money,

    /// Commit timestamp, UTC.
    pub created_at: DateTime<Utc>,
}

/// A line item in a bill.
///
/// ## Snapshot Pattern
/// Item name and unit price are copied into the line at commit time.
/// Later catalog edits or even deleting the item leave historical bills
/// untouched, so `item_id` is a plain reference, not a constrained one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub id: i64,

    pub bill_id: i64,

    /// The source item at sale time. May no longer exist.
    pub item_id: i64,

    /// Item name at time of sale (frozen).
    pub item_name: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_at_time_cents"))]
    pub price_at_time: Money,
}

/// A bill together with its owned lines - the history read-path shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillWithLines {
    #[serde(flatten)]
    pub bill: Bill,

    pub items: Vec<BillLine>,
}

// =============================================================================
// Request Payloads (wire side)
// =============================================================================

/// Item fields as the client sends them. Everything is optional at this
/// level; `validate_new_item` / `validate_item_patch` decide what is
/// actually required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    /// Decimal string, e.g. `"2.50"`.
    pub price: Option<String>,
    pub min_quantity: Option<i64>,
    pub description: Option<String>,
}

/// One requested line of a sale, as the client sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLineInput {
    pub item_id: Option<i64>,
    pub quantity: Option<i64>,
}

/// A sale request as the client sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub customer_name: Option<String>,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<BillLineInput>,
}

// =============================================================================
// Validated Forms (store side)
// =============================================================================

/// A fully validated item ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub sku: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub price: Money,
    pub min_quantity: i64,
    pub description: Option<String>,
}

/// A validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Money>,
    pub min_quantity: Option<i64>,
    pub description: Option<String>,
}

impl ItemPatch {
    /// Applies the patch to an existing row, producing the merged row.
    pub fn apply_to(&self, mut item: Item) -> Item {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(sku) = &self.sku {
            item.sku = Some(sku.clone());
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(min_quantity) = self.min_quantity {
            item.min_quantity = Some(min_quantity);
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        item
    }
}

/// One validated requested line: a real item id and a quantity >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedLine {
    pub item_id: i64,
    pub quantity: i64,
}

/// A fully validated sale request, ready for the transaction engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    pub lines: Vec<RequestedLine>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_strings() {
        assert_eq!(PaymentMethod::parse("Cash"), Some(PaymentMethod::Cash));
        assert_eq!(PaymentMethod::parse("Card"), Some(PaymentMethod::Card));
        assert_eq!(
            PaymentMethod::parse("Room Charge"),
            Some(PaymentMethod::RoomCharge)
        );
        assert_eq!(PaymentMethod::parse("Cheque"), None);
        assert_eq!(PaymentMethod::parse("cash"), None);
    }

    #[test]
    fn test_payment_method_serde_round_trip() {
        let json = serde_json::to_string(&PaymentMethod::RoomCharge).unwrap();
        assert_eq!(json, "\"Room Charge\"");
        let back: PaymentMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PaymentMethod::RoomCharge);
    }

    #[test]
    fn test_item_patch_merge_leaves_unset_fields() {
        let item = Item {
            id: 1,
            name: "Mineral Water (500ml)".to_string(),
            sku: Some("BEV-001".to_string()),
            category: "Beverages".to_string(),
            quantity: 100,
            price: Money::from_cents(250),
            min_quantity: Some(20),
            description: Some("Standard bottled water".to_string()),
        };

        let patch = ItemPatch {
            price: Some(Money::from_cents(300)),
            quantity: Some(90),
            ..ItemPatch::default()
        };

        let merged = patch.apply_to(item.clone());
        assert_eq!(merged.price.cents(), 300);
        assert_eq!(merged.quantity, 90);
        assert_eq!(merged.name, item.name);
        assert_eq!(merged.sku, item.sku);
        assert_eq!(merged.min_quantity, item.min_quantity);
    }

    #[test]
    fn test_bill_with_lines_flattens_on_the_wire() {
        let bill = BillWithLines {
            bill: Bill {
                id: 7,
                customer_name: "Room 204".to_string(),
                payment_method: PaymentMethod::Cash,
                total_amount: Money::from_cents(750),
                created_at: Utc::now(),
            },
            items: vec![],
        };

        let value = serde_json::to_value(&bill).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["customerName"], "Room 204");
        assert_eq!(value["totalAmount"], "7.50");
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
