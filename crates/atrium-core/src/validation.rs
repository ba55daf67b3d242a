//! # Validation Module
//!
//! Input validation for Atrium POS.
//!
//! ## Validation Strategy
//! ```text
//!   Layer 1: HTTP deserialization  - shape and JSON types
//!   Layer 2: THIS MODULE           - required fields, ranges, enums
//!   Layer 3: Database              - NOT NULL, CHECK constraints
//! ```
//!
//! Each `validate_*` function checks one payload and returns the typed,
//! validated form the store accepts. The first offending field wins;
//! nothing is written before validation passes.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{
    BillLineInput, CreateBillRequest, ItemInput, ItemPatch, NewBill, NewItem, PaymentMethod,
    RequestedLine,
};
use crate::DEFAULT_MIN_QUANTITY;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an item name: non-empty, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a category: non-empty, at most 100 characters.
pub fn validate_category(category: &str) -> ValidationResult<String> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 100,
        });
    }

    Ok(category.to_string())
}

/// Parses a price string into `Money`, rejecting negatives.
///
/// ## Example
/// ```rust
/// use atrium_core::validation::parse_price;
///
/// assert_eq!(parse_price("2.50").unwrap().cents(), 250);
/// assert!(parse_price("-1.00").is_err());
/// assert!(parse_price("cheap").is_err());
/// ```
pub fn parse_price(price: &str) -> ValidationResult<Money> {
    let money: Money = price.parse().map_err(|e: crate::money::ParseMoneyError| {
        ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: e.to_string(),
        }
    })?;

    if money.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(money)
}

/// Validates a stock quantity: non-negative.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<i64> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(qty)
}

/// Validates a reorder threshold: non-negative.
pub fn validate_min_quantity(qty: i64) -> ValidationResult<i64> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "minQuantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(qty)
}

/// Validates a customer name: non-empty, at most 200 characters.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customerName".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customerName".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Parses a payment-method wire string against the fixed tender set.
pub fn parse_payment_method(method: &str) -> ValidationResult<PaymentMethod> {
    PaymentMethod::parse(method).ok_or_else(|| ValidationError::NotAllowed {
        field: "paymentMethod".to_string(),
        allowed: PaymentMethod::ALLOWED.to_vec(),
    })
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a full item payload for creation.
///
/// Required: name, category, price. Defaults: quantity 0, minQuantity 5.
pub fn validate_new_item(input: &ItemInput) -> ValidationResult<NewItem> {
    let name = validate_item_name(input.name.as_deref().unwrap_or(""))?;
    let category = validate_category(input.category.as_deref().unwrap_or(""))?;

    let price = match input.price.as_deref() {
        Some(raw) => parse_price(raw)?,
        None => {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            })
        }
    };

    let quantity = validate_stock_quantity(input.quantity.unwrap_or(0))?;
    let min_quantity = validate_min_quantity(input.min_quantity.unwrap_or(DEFAULT_MIN_QUANTITY))?;

    Ok(NewItem {
        name,
        sku: input.sku.as_deref().map(|s| s.trim().to_string()),
        category,
        quantity,
        price,
        min_quantity,
        description: input.description.clone(),
    })
}

/// Validates a partial item payload for update.
///
/// Only the fields present are checked; absent fields stay untouched in
/// the stored row. An empty payload is a valid no-op.
pub fn validate_item_patch(input: &ItemInput) -> ValidationResult<ItemPatch> {
    let mut patch = ItemPatch::default();

    if let Some(name) = input.name.as_deref() {
        patch.name = Some(validate_item_name(name)?);
    }
    if let Some(category) = input.category.as_deref() {
        patch.category = Some(validate_category(category)?);
    }
    if let Some(price) = input.price.as_deref() {
        patch.price = Some(parse_price(price)?);
    }
    if let Some(quantity) = input.quantity {
        patch.quantity = Some(validate_stock_quantity(quantity)?);
    }
    if let Some(min_quantity) = input.min_quantity {
        patch.min_quantity = Some(validate_min_quantity(min_quantity)?);
    }
    patch.sku = input.sku.as_deref().map(|s| s.trim().to_string());
    patch.description = input.description.clone();

    Ok(patch)
}

/// Validates the requested lines of a sale: at least one line, a real
/// item id on each, and every quantity >= 1.
///
/// The transaction engine calls this again on entry, so a caller that
/// bypasses the HTTP layer still cannot feed it a malformed request.
pub fn validate_requested_lines(lines: &[RequestedLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for line in lines {
        if line.quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a full sale request into the form the engine accepts.
pub fn validate_bill_request(input: &CreateBillRequest) -> ValidationResult<NewBill> {
    let customer_name = validate_customer_name(input.customer_name.as_deref().unwrap_or(""))?;

    let payment_method = match input.payment_method.as_deref() {
        Some(raw) => parse_payment_method(raw)?,
        None => {
            return Err(ValidationError::Required {
                field: "paymentMethod".to_string(),
            })
        }
    };

    let lines = input
        .items
        .iter()
        .map(validate_line_input)
        .collect::<ValidationResult<Vec<_>>>()?;
    validate_requested_lines(&lines)?;

    Ok(NewBill {
        customer_name,
        payment_method,
        lines,
    })
}

fn validate_line_input(line: &BillLineInput) -> ValidationResult<RequestedLine> {
    let item_id = line.item_id.ok_or_else(|| ValidationError::Required {
        field: "itemId".to_string(),
    })?;
    let quantity = line.quantity.ok_or_else(|| ValidationError::Required {
        field: "quantity".to_string(),
    })?;

    Ok(RequestedLine { item_id, quantity })
}

// =============================================================================
// Unit Tests
// =============================================================================
