//! # Validation Rules
//!
//! Input validation for the catalog and the sale ledger. These checks run
//! before any row is touched, so a rejected input has zero side effects.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Caller input (NewItem / NewSale / ...)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validation::validate_*()  ← THIS MODULE (pure, no I/O)                │
//! │       │                                                                 │
//! │       ├── Err(ValidationError) → surfaced before any SQL runs          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  easyinv-db repository executes the statements                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{ItemUpdate, NewItem, NewSale};
use crate::MAX_DESCRIPTION_LEN;

/// Validates fields shared by creation and update.
fn validate_item_fields(
    name: &str,
    description: Option<&str>,
    prices: [i64; 3],
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if let Some(desc) = description {
        if desc.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LEN,
            });
        }
    }

    for (price, field) in prices.iter().zip([
        "price_public",
        "price_wholesale",
        "price_distributor",
    ]) {
        if *price < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates an item about to be created or resurrected.
pub fn validate_new_item(item: &NewItem) -> Result<(), ValidationError> {
    if item.sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    validate_item_fields(
        &item.name,
        item.description.as_deref(),
        [
            item.price_public_cents,
            item.price_wholesale_cents,
            item.price_distributor_cents,
        ],
    )
}

/// Validates an unconditional item overwrite.
pub fn validate_item_update(update: &ItemUpdate) -> Result<(), ValidationError> {
    validate_item_fields(
        &update.name,
        update.description.as_deref(),
        [
            update.price_public_cents,
            update.price_wholesale_cents,
            update.price_distributor_cents,
        ],
    )
}

/// Validates a sale before registration: at least one line, every quantity
/// strictly positive, no negative unit price.
///
/// Note what is deliberately NOT here: a stock sufficiency check. The ledger
/// debits unconditionally; availability is the calling layer's concern.
pub fn validate_new_sale(sale: &NewSale) -> Result<(), ValidationError> {
    if sale.lines.is_empty() {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        });
    }

    for line in &sale.lines {
        if line.qty <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "qty".to_string(),
            });
        }
        if line.unit_price_cents < 0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "unit_price".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a provider name.
pub fn validate_provider_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleLine;

    fn sample_item() -> NewItem {
        NewItem {
            sku: "SKU-1".to_string(),
            name: "Widget".to_string(),
            description: None,
            price_public_cents: 1000,
            price_wholesale_cents: 900,
            price_distributor_cents: 800,
            stock: 10,
            min_stock: 2,
            max_stock: 20,
            location: "A-1".to_string(),
            provider_id: None,
        }
    }

    #[test]
    fn test_valid_item_passes() {
        assert!(validate_new_item(&sample_item()).is_ok());
    }

    #[test]
    fn test_blank_sku_rejected() {
        let mut item = sample_item();
        item.sku = "   ".to_string();
        assert!(matches!(
            validate_new_item(&item),
            Err(ValidationError::Required { field }) if field == "sku"
        ));
    }

    #[test]
    fn test_overlong_description_rejected() {
        let mut item = sample_item();
        item.description = Some("x".repeat(256));
        assert!(matches!(
            validate_new_item(&item),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut item = sample_item();
        item.price_wholesale_cents = -1;
        assert!(matches!(
            validate_new_item(&item),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_sale_requires_lines() {
        let sale = NewSale {
            title: String::new(),
            client_id: None,
            lines: vec![],
            payment_method: "efectivo".to_string(),
        };
        assert!(matches!(
            validate_new_sale(&sale),
            Err(ValidationError::Required { field }) if field == "lines"
        ));
    }

    #[test]
    fn test_sale_rejects_zero_qty() {
        let sale = NewSale {
            title: String::new(),
            client_id: None,
            lines: vec![SaleLine {
                item_id: 1,
                item_name: "Widget".to_string(),
                qty: 0,
                unit_price_cents: 100,
            }],
            payment_method: "efectivo".to_string(),
        };
        assert!(matches!(
            validate_new_sale(&sale),
            Err(ValidationError::MustBePositive { .. })
        ));
    }
}
