//! # Repository Module
//!
//! Database repository implementations for EasyInv.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  GUI caller                                                            │
//! │       │                                                                 │
//! │       │  db.items().add_item(new_item)                                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── add_item(&self, item)         ← resurrection-aware               │
//! │  ├── update_item(&self, id, upd)                                       │
//! │  ├── delete_by_sku(&self, sku)     ← soft, idempotent                 │
//! │  └── list(&self, limit)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Plain records in, plain records out - no GUI types                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Catalog CRUD, soft delete, restock views
//! - [`provider::ProviderRepository`] - Supplier CRUD (soft delete)
//! - [`sale::SaleRepository`] - The atomic sale ledger

pub mod item;
pub mod provider;
pub mod sale;
