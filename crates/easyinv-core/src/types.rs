//! # Domain Types
//!
//! Core domain types used throughout EasyInv.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Sale       │   │  SaleLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (rowid)     │   │  id (rowid)     │   │  sale_id (FK)   │       │
//! │  │  sku (business) │   │  title          │   │  item_id (weak) │       │
//! │  │  3 price tiers  │   │  total_cents    │   │  item_name snap │       │
//! │  │  stock band     │   │  payment_method │   │  qty × price    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Provider ──weak──► Item.provider_id (soft delete keeps the link)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Items have:
//! - `id`: integer rowid - immutable, used for database relations
//! - `sku`: business key - human-readable, unique among **active** items;
//!   a tombstoned SKU is resurrected in place, never duplicated

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A catalog item with three price tiers and a restock band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Surrogate key (SQLite rowid).
    pub id: i64,

    /// Stock Keeping Unit - business identifier, stable for the row's life.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Optional description (at most 255 chars).
    pub description: Option<String>,

    /// Public (retail) price in cents.
    pub price_public_cents: i64,

    /// Wholesale tier price in cents.
    pub price_wholesale_cents: i64,

    /// Distributor tier price in cents.
    pub price_distributor_cents: i64,

    /// Current stock. Signed: overselling can drive it negative.
    pub stock: i64,

    /// Lower bound of the restock band; `stock <= min_stock` flags reorder.
    pub min_stock: i64,

    /// Upper bound of the restock band; 0 disables restock suggestions.
    pub max_stock: i64,

    /// Free-text storage location.
    pub location: String,

    /// Weak reference to the supplier. Survives provider soft-deletion.
    pub provider_id: Option<i64>,

    /// Whether the item is active (soft delete).
    pub active: bool,

    /// When the row was created (refreshed on resurrection).
    pub created_at: DateTime<Utc>,

    /// Supplier name, joined in by every item query. None when the item has
    /// no provider.
    pub provider_name: Option<String>,
}

impl Item {
    /// Returns the public price as Money.
    #[inline]
    pub fn price_public(&self) -> Money {
        Money::from_cents(self.price_public_cents)
    }

    /// Returns the wholesale price as Money.
    #[inline]
    pub fn price_wholesale(&self) -> Money {
        Money::from_cents(self.price_wholesale_cents)
    }

    /// Returns the distributor price as Money.
    #[inline]
    pub fn price_distributor(&self) -> Money {
        Money::from_cents(self.price_distributor_cents)
    }

    /// Whether the stock level has fallen into reorder territory.
    #[inline]
    pub fn needs_reorder(&self) -> bool {
        self.stock <= self.min_stock
    }
}

/// Fields for creating (or resurrecting) an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price_public_cents: i64,
    pub price_wholesale_cents: i64,
    pub price_distributor_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub location: String,
    pub provider_id: Option<i64>,
}

/// Fields overwritten by an item update. The SKU is immutable post-creation
/// by convention, so it does not appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price_public_cents: i64,
    pub price_wholesale_cents: i64,
    pub price_distributor_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub location: String,
    pub provider_id: Option<i64>,
}

impl From<NewItem> for ItemUpdate {
    fn from(item: NewItem) -> Self {
        ItemUpdate {
            name: item.name,
            description: item.description,
            price_public_cents: item.price_public_cents,
            price_wholesale_cents: item.price_wholesale_cents,
            price_distributor_cents: item.price_distributor_cents,
            stock: item.stock,
            min_stock: item.min_stock,
            max_stock: item.max_stock,
            location: item.location,
            provider_id: item.provider_id,
        }
    }
}

// =============================================================================
// Provider
// =============================================================================

/// A supplier. Weakly referenced by items; only ever soft-deleted so that
/// historic items keep their reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale header. Append-only: never updated or deleted by normal
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub title: String,
    /// Placeholder for a future customer ledger; currently unused.
    pub client_id: Option<i64>,
    /// Server-computed: always Σ(qty × unit_price) over the line items.
    pub total_cents: i64,
    /// Enumerated free text ("efectivo", "tarjeta", ...).
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A persisted sale line item.
/// Uses snapshot pattern to freeze the item name at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub id: i64,
    pub sale_id: i64,
    /// Weak reference - the item may later be soft-deleted.
    pub item_id: i64,
    /// Item name at time of sale (frozen).
    pub item_name: String,
    pub qty: i64,
    /// Unit price in cents of the tier chosen at sale time (frozen).
    pub unit_price_cents: i64,
}

impl SaleLineItem {
    /// Returns the line subtotal (qty × unit price) as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.qty)
    }
}

/// One line of a sale being registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_id: i64,
    /// Denormalized name copied into the ledger so history survives deletion.
    pub item_name: String,
    pub qty: i64,
    pub unit_price_cents: i64,
}

impl SaleLine {
    /// Returns the line subtotal (qty × unit price) as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.qty)
    }
}

/// A sale submitted for registration. There is deliberately no `total` field:
/// the ledger computes it from the lines and ignores any caller arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    /// Optional title; blank falls back to [`crate::DEFAULT_SALE_TITLE`].
    pub title: String,
    pub client_id: Option<i64>,
    pub lines: Vec<SaleLine>,
    pub payment_method: String,
}

impl NewSale {
    /// Computes the server-side total over all lines.
    pub fn computed_total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.subtotal())
    }
}

/// A resolved line of a past sale, as shown in the sale detail view and the
/// sales report. `sku` comes from a LEFT JOIN and is None when the item row
/// was hard-removed by a restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleDetailLine {
    pub item_name: String,
    pub qty: i64,
    pub unit_price_cents: i64,
    /// qty × unit_price, computed in the query.
    pub subtotal_cents: i64,
    pub sku: Option<String>,
}

// =============================================================================
// Restock Views
// =============================================================================

/// Per-provider stock line with the advisor's suggestion attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStockLine {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    /// `max(0, max_stock - stock)` when the band is enabled, else 0.
    pub restock_qty: i64,
}

/// One row of the global reorder report (`stock <= min_stock`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderLine {
    pub sku: String,
    pub name: String,
    pub provider_name: Option<String>,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    /// Quantity to order, clamped to non-negative.
    pub to_order: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
