//! # Backup/Restore Error Types
//!
//! Three error families, one per engine: `BackupError` for exports,
//! `RestoreError` for the file swap, `ImportError` for the CSV batch.
//! Kept separate because their failure semantics differ - a failed export
//! leaves the world untouched, a failed restore may need `.bak` recovery,
//! and a failed import row is not a failed import.

use easyinv_db::DbError;
use thiserror::Error;

/// Errors from the export engines (snapshot, reports).
///
/// Exports never modify live state; any of these means "nothing happened"
/// (up to a removed temp file).
#[derive(Debug, Error)]
pub enum BackupError {
    /// The data layer failed underneath the export.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Filesystem failure (temp file, destination, removal).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive writing failed.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Sales report serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reorder report writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors from the restore engine.
///
/// ## Failure Timeline
/// ```text
/// InvalidArchive / Zip / Io(extract)  → live state untouched
/// Permission / Fatal                  → post-quiesce; .bak recovery was
///                                       attempted, error log written
/// ```
#[derive(Debug, Error)]
pub enum RestoreError {
    /// The archive has no `.db` entry (or is not a zip at all).
    #[error("Invalid backup archive: {0}")]
    InvalidArchive(String),

    /// Archive could not be read.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Filesystem failure before the swap began.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The live file is held open elsewhere (locked on this platform).
    /// The `.bak` sidecar was restored if the live path was left vacant.
    #[error("Permission denied during file swap: {0}")]
    Permission(String),

    /// Any other post-quiesce failure. Recovery was attempted; check the
    /// error log and the `.bak` sidecar.
    #[error("Restore failed: {0}")]
    Fatal(String),
}

/// Errors that abort an entire CSV import batch.
///
/// Per-row problems are NOT errors at this level - they are collected in
/// [`crate::ImportReport::errors`] while the batch continues.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is not valid UTF-8.
    #[error("Import file is not valid UTF-8")]
    NotUtf8,

    /// The header row is missing or lacks required columns.
    #[error("Invalid import header: {0}")]
    InvalidHeader(String),

    /// The CSV structure itself could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The data layer failed underneath the import.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// Filesystem failure (template writing, file reading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_archive_message() {
        let err = RestoreError::InvalidArchive("no .db entry found".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid backup archive: no .db entry found"
        );
    }

    #[test]
    fn test_db_error_converts() {
        let err: BackupError = DbError::not_found("Sale", 7).into();
        assert!(err.to_string().contains("Sale not found: 7"));
    }
}
