//! # Snapshot Export
//!
//! Hot backup of the live database into a single-entry zip archive.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       export_snapshot()                                 │
//! │                                                                         │
//! │  live pool ──VACUUM INTO──► temp_backup.db ──zip──► dest.zip           │
//! │                                   │                                     │
//! │                                   └── removed afterwards, success       │
//! │                                       or failure                        │
//! │                                                                         │
//! │  The live database stays open and writable throughout. VACUUM INTO     │
//! │  produces a transactionally-consistent, compacted copy; a raw file     │
//! │  copy of a WAL database would not.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::archive;
use crate::error::BackupError;
use crate::errorlog::ErrorLog;
use crate::paths::StorePaths;
use easyinv_db::Database;

/// Exports a consistent snapshot of the live database to a zip archive at
/// `dest`.
///
/// The archive contains exactly one entry, `inventory.db`, whatever `dest`
/// is named. The live database is not closed or locked beyond the internal
/// `VACUUM INTO` statement.
pub async fn export_snapshot(
    db: &Database,
    paths: &StorePaths,
    dest: &Path,
) -> Result<(), BackupError> {
    let temp = paths.temp_backup();
    info!(dest = %dest.display(), "Exporting snapshot");

    // VACUUM INTO refuses to overwrite; a stale temp from a crashed run
    // must go first
    if temp.exists() {
        fs::remove_file(&temp)?;
    }

    let result = copy_and_pack(db, &temp, dest).await;

    if temp.exists() {
        if let Err(e) = fs::remove_file(&temp) {
            warn!(path = %temp.display(), error = %e, "Could not remove temp backup file");
        }
    }

    // A failed backup is exactly what the durable log exists for
    if let Err(e) = &result {
        ErrorLog::new(paths.error_log()).append("EXPORT", &e.to_string());
    }

    result
}

async fn copy_and_pack(db: &Database, temp: &Path, dest: &Path) -> Result<(), BackupError> {
    db.hot_copy_to(temp).await?;
    archive::pack_database(temp, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyinv_db::DbConfig;

    #[tokio::test]
    async fn test_export_creates_archive_and_cleans_temp() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::new(dir.path());
        let dest = dir.path().join("backup.zip");

        let db = Database::new(DbConfig::new(paths.database())).await.unwrap();
        export_snapshot(&db, &paths, &dest).await.unwrap();
        db.close().await;

        assert!(dest.exists());
        assert!(!paths.temp_backup().exists(), "temp file must be removed");

        // The archive must contain a restorable database entry
        let extracted = dir.path().join("extracted.db");
        archive::extract_database(&dest, &extracted).unwrap();
        assert!(extracted.metadata().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_failed_export_hits_the_error_log() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::new(dir.path());
        // Destination inside a directory that does not exist
        let dest = dir.path().join("missing").join("backup.zip");

        let db = Database::new(DbConfig::new(paths.database())).await.unwrap();
        export_snapshot(&db, &paths, &dest).await.unwrap_err();
        db.close().await;

        assert!(!paths.temp_backup().exists(), "temp cleaned up on failure");

        let log = ErrorLog::new(paths.error_log());
        assert!(log.read().contains("EXPORT:"), "failure must be logged");
    }

    #[tokio::test]
    async fn test_export_survives_stale_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::new(dir.path());
        let dest = dir.path().join("backup.zip");

        // Leftover from a hypothetical crashed run
        std::fs::write(paths.temp_backup(), b"stale").unwrap();

        let db = Database::new(DbConfig::new(paths.database())).await.unwrap();
        export_snapshot(&db, &paths, &dest).await.unwrap();
        db.close().await;

        assert!(dest.exists());
        assert!(!paths.temp_backup().exists());
    }
}
