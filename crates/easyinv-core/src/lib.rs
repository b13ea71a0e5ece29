//! # easyinv-core: Pure Business Logic for EasyInv
//!
//! This crate is the **heart** of the EasyInv inventory and point-of-sale
//! ledger. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EasyInv Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    GUI (external caller)                        │   │
//! │  │    inventory view ── sale dialog ── provider view ── tools      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain records in, results out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ easyinv-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  restock  │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │  advisor  │  │   rules   │  │   │
//! │  │   │   Sale    │  │  parsing  │  │   band    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    easyinv-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Provider, Sale, SaleLineItem, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`restock`] - Restock advisor (pure derivation over the stock band)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod restock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use easyinv_core::Money` instead of
// `use easyinv_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use restock::restock_qty;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Title given to a sale registered without one.
///
/// ## Why a constant?
/// The ledger never stores a NULL or empty title; a blank title from the
/// caller is replaced with this label before the header insert.
pub const DEFAULT_SALE_TITLE: &str = "Venta";

/// Maximum length of an item description.
pub const MAX_DESCRIPTION_LEN: usize = 255;
