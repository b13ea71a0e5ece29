//! # Restock Advisor
//!
//! Pure derivation of reorder quantities from the stock band. No side
//! effects: the advisor only ever looks at two integers.
//!
//! ## The Restock Band
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   stock ──────●──────────────────────────────                          │
//! │               │                                                         │
//! │   0 ────── min_stock ───────────────── max_stock                       │
//! │               ▲                            ▲                            │
//! │               │                            │                            │
//! │        "needs reorder"            "fill back up to here"               │
//! │        (stock <= min_stock)       restock_qty = max_stock - stock      │
//! │                                                                         │
//! │   max_stock == 0 disables the band entirely: restock_qty is 0          │
//! │   no matter how low (or negative) the stock goes.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{ProviderStockLine, ReorderLine};

/// Suggested quantity to order for an item.
///
/// Returns `max(0, max_stock - stock)` when `max_stock > 0`, otherwise 0.
/// Overstocked items (stock above max) suggest nothing rather than a
/// negative order.
///
/// ## Example
/// ```rust
/// use easyinv_core::restock::restock_qty;
///
/// assert_eq!(restock_qty(5, 50), 45);
/// assert_eq!(restock_qty(60, 50), 0);  // overstocked
/// assert_eq!(restock_qty(-3, 0), 0);   // band disabled
/// ```
#[inline]
pub fn restock_qty(stock: i64, max_stock: i64) -> i64 {
    if max_stock > 0 {
        (max_stock - stock).max(0)
    } else {
        0
    }
}

/// Attaches the advisor's suggestion to a raw per-provider stock row.
pub fn provider_stock_line(
    id: i64,
    sku: String,
    name: String,
    stock: i64,
    min_stock: i64,
    max_stock: i64,
) -> ProviderStockLine {
    ProviderStockLine {
        id,
        sku,
        name,
        stock,
        min_stock,
        max_stock,
        restock_qty: restock_qty(stock, max_stock),
    }
}

/// Builds a reorder-report line with the clamped quantity to order.
pub fn reorder_line(
    sku: String,
    name: String,
    provider_name: Option<String>,
    stock: i64,
    min_stock: i64,
    max_stock: i64,
) -> ReorderLine {
    ReorderLine {
        sku,
        name,
        provider_name,
        stock,
        min_stock,
        max_stock,
        to_order: restock_qty(stock, max_stock),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
