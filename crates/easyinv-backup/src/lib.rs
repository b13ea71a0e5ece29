//! # easyinv-backup: File-Level Engines for EasyInv
//!
//! Everything that operates on the database **file** while (or after) the
//! pool in `easyinv-db` operates on the database **connection**.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       easyinv-backup                                    │
//! │                                                                         │
//! │   snapshot ──► VACUUM INTO + zip      "one .zip, one inventory.db"     │
//! │   restore  ──► validate / extract / quiesce / swap / commit            │
//! │   report   ──► sales JSON + reorder CSV                                │
//! │   import   ──► bulk item upsert from CSV                               │
//! │   errorlog ──► append-only error_log.txt                               │
//! │   paths    ──► every filename convention, in one place                 │
//! │                                                                         │
//! │   Uses easyinv-db for queries; owns renames, temp files and archives.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod archive;
pub mod error;
pub mod errorlog;
pub mod import;
pub mod paths;
pub mod report;
pub mod restore;
pub mod snapshot;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{BackupError, ImportError, RestoreError};
pub use errorlog::ErrorLog;
pub use import::{import_items_csv, write_import_template, ImportReport, RowError};
pub use paths::StorePaths;
pub use report::{export_reorder_report, export_sales_report, write_sales_report, SaleReport};
pub use restore::{restore_snapshot, RestorePending};
pub use snapshot::export_snapshot;
