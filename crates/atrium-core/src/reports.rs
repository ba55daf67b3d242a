//! # Dashboard Report Helpers
//!
//! Pure aggregation functions over already-loaded collections. These do
//! no store access of their own; the caller loads the rows and hands
//! them in, which keeps every function deterministic and trivially
//! testable.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{Bill, Item};
use crate::DEFAULT_MIN_QUANTITY;

/// Items at or below their reorder threshold.
///
/// An item with no explicit threshold uses the default of 5, matching
/// the catalog's insert default.
pub fn low_stock(items: &[Item]) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| item.quantity <= item.min_quantity.unwrap_or(DEFAULT_MIN_QUANTITY))
        .collect()
}

/// Total value of stock on hand: sum of price x quantity over all items.
pub fn stock_value(items: &[Item]) -> Money {
    items
        .iter()
        .fold(Money::zero(), |acc, item| {
            acc + item.price.multiply_quantity(item.quantity)
        })
}

/// Revenue from bills committed on the same UTC calendar day as `now`.
///
/// Timestamps are stored in UTC, so "today" is the UTC date of `now`.
/// This keeps the result independent of the server's local timezone.
pub fn todays_revenue(bills: &[Bill], now: DateTime<Utc>) -> Money {
    let today = now.date_naive();
    bills
        .iter()
        .filter(|bill| bill.created_at.date_naive() == today)
        .fold(Money::zero(), |acc, bill| acc + bill.total_amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::{Duration, TimeZone};

    fn item(name: &str, quantity: i64, price_cents: i64, min_quantity: Option<i64>) -> Item {
        Item {
            id: 0,
            name: name.to_string(),
            sku: None,
            category: "Beverages".to_string(),
            quantity,
            price: Money::from_cents(price_cents),
            min_quantity,
            description: None,
        }
    }

    fn bill(total_cents: i64, created_at: DateTime<Utc>) -> Bill {
        Bill {
            id: 0,
            customer_name: "Guest".to_string(),
            payment_method: PaymentMethod::Cash,
            total_amount: Money::from_cents(total_cents),
            created_at,
        }
    }

    #[test]
    fn test_low_stock_uses_threshold() {
        let items = vec![
            item("Water", 10, 250, Some(20)),  // below threshold
            item("Soda", 50, 300, Some(10)),   // healthy
            item("Sandwich", 5, 1200, Some(5)), // exactly at threshold counts
        ];

        let low = low_stock(&items);
        let names: Vec<&str> = low.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Water", "Sandwich"]);
    }

    #[test]
    fn test_low_stock_defaults_threshold_to_five() {
        let items = vec![
            item("No threshold, low", 5, 100, None),
            item("No threshold, fine", 6, 100, None),
        ];

        let low = low_stock(&items);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "No threshold, low");
    }

    #[test]
    fn test_stock_value_is_exact() {
        let items = vec![
            item("Water", 100, 250, None), // 250.00
            item("Spa Voucher", 999, 8000, None), // 79920.00
        ];

        assert_eq!(stock_value(&items).cents(), 100 * 250 + 999 * 8000);
        assert_eq!(stock_value(&[]).cents(), 0);
    }

    #[test]
    fn test_todays_revenue_filters_by_utc_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0).unwrap();

        let bills = vec![
            bill(750, now - Duration::hours(2)),       // today
            bill(1200, now - Duration::hours(14)),     // today, just after midnight
            bill(500, now - Duration::hours(16)),      // yesterday
            bill(8000, now + Duration::days(1)),       // tomorrow
        ];

        assert_eq!(todays_revenue(&bills, now).cents(), 750 + 1200);
    }

    #[test]
    fn test_todays_revenue_empty() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        assert_eq!(todays_revenue(&[], now), Money::zero());
    }
}
