//! # Restore Engine
//!
//! Replaces the live database file with the contents of a backup archive.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      restore_snapshot()                                 │
//! │                                                                         │
//! │  1. VALIDATE   open zip, find first *.db entry                         │
//! │                   └── none → InvalidArchive, live state untouched      │
//! │  2. EXTRACT    entry → temp_restore_inv.db (same dir as live file,     │
//! │                so the final rename is atomic)                          │
//! │                   └── failure → remove temp, live state untouched      │
//! │  3. QUIESCE    db.close().await - every pooled handle released         │
//! │  4. SWAP       remove old .bak, rename live → inventory.db.bak         │
//! │  5. COMMIT     rename temp → live path                                 │
//! │  6. TERMINATE  return RestorePending: the caller must exit the         │
//! │                process; in-process state referring to the old file     │
//! │                is invalid                                              │
//! │                                                                         │
//! │  Post-quiesce failure: best-effort .bak → live recovery (only when    │
//! │  the live path was left vacant), entry appended to the error log.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The function consumes the [`Database`] handle: after a restore attempt
//! there is no valid pool to hand back, successful or not.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{error, info, warn};

use crate::archive;
use crate::error::RestoreError;
use crate::errorlog::ErrorLog;
use crate::paths::StorePaths;
use easyinv_db::Database;

/// Proof that a restore committed.
///
/// The process must exit after obtaining one: pools, prepared statements and
/// any cached state still refer to the replaced file. Construction is
/// private; the only way to get a `RestorePending` is a successful swap.
#[derive(Debug)]
#[must_use = "the process must exit after a committed restore"]
pub struct RestorePending {
    _guard: (),
}

/// Restores the live database from a backup archive.
///
/// Consumes `db`; see the module docs for the state machine and failure
/// semantics.
pub async fn restore_snapshot(
    db: Database,
    paths: &StorePaths,
    archive_path: &Path,
    log: &ErrorLog,
) -> Result<RestorePending, RestoreError> {
    let live = paths.database();
    let bak = paths.sidecar_bak();
    let temp = paths.temp_restore();

    info!(archive = %archive_path.display(), "Starting restore");

    // Steps 1+2: validate and extract. Any failure here leaves the live
    // state untouched (up to temp removal).
    if let Err(e) = archive::extract_database(archive_path, &temp) {
        if temp.exists() {
            if let Err(rm) = fs::remove_file(&temp) {
                warn!(path = %temp.display(), error = %rm, "Could not remove temp restore file");
            }
        }
        return Err(e);
    }

    // Step 3: quiesce. On platforms that lock open files the rename below
    // would otherwise fail against our own handles.
    db.close().await;

    // Steps 4+5: swap with backup, then commit.
    match swap_files(&live, &bak, &temp) {
        Ok(()) => {
            info!(live = %live.display(), bak = %bak.display(), "Restore committed");
            Ok(RestorePending { _guard: () })
        }
        Err(e) => {
            error!(error = %e, "Restore swap failed, attempting recovery");
            recover_sidecar(&live, &bak);

            let restore_err = if e.kind() == io::ErrorKind::PermissionDenied {
                RestoreError::Permission(e.to_string())
            } else {
                RestoreError::Fatal(e.to_string())
            };

            log.append("RESTORE", &restore_err.to_string());
            Err(restore_err)
        }
    }
}

/// Renames live → `.bak`, then temp → live. A prior `.bak` is discarded.
fn swap_files(live: &Path, bak: &Path, temp: &Path) -> io::Result<()> {
    if bak.exists() {
        fs::remove_file(bak)?;
    }
    if live.exists() {
        fs::rename(live, bak)?;
    }
    fs::rename(temp, live)
}

/// Best-effort: put the `.bak` sidecar back on the live path, but only when
/// the live path was left vacant - never clobber a present live file.
fn recover_sidecar(live: &Path, bak: &Path) {
    if !live.exists() && bak.exists() {
        match fs::rename(bak, live) {
            Ok(()) => info!("Recovered previous database from .bak sidecar"),
            Err(e) => error!(error = %e, "Sidecar recovery failed; .bak left in place"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::export_snapshot;
    use easyinv_core::{NewItem, NewSale, SaleLine};
    use easyinv_db::DbConfig;

    fn widget(sku: &str) -> NewItem {
        NewItem {
            sku: sku.to_string(),
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

    #[tokio::test]
    async fn test_round_trip_reproduces_all_rows() {
        // Source store: one provider, one item, one sale
        let src_dir = tempfile::tempdir().unwrap();
        let src_paths = StorePaths::new(src_dir.path());
        let src_db = Database::new(DbConfig::new(src_paths.database()))
            .await
            .unwrap();

        src_db.providers().add("Acme Parts", None).await.unwrap();
        let item_id = src_db.items().add_item(&widget("W-1")).await.unwrap();
        src_db
            .sales()
            .register_sale(&NewSale {
                title: "Counter sale".to_string(),
                client_id: None,
                lines: vec![SaleLine {
                    item_id,
                    item_name: "Widget".to_string(),
                    qty: 2,
                    unit_price_cents: 1000,
                }],
                payment_method: "cash".to_string(),
            })
            .await
            .unwrap();

        let archive_path = src_dir.path().join("backup.zip");
        export_snapshot(&src_db, &src_paths, &archive_path)
            .await
            .unwrap();
        src_db.close().await;

        // Fresh store: empty database, then restore into it
        let dst_dir = tempfile::tempdir().unwrap();
        let dst_paths = StorePaths::new(dst_dir.path());
        let dst_db = Database::new(DbConfig::new(dst_paths.database()))
            .await
            .unwrap();
        let log = ErrorLog::new(dst_paths.error_log());

        let _pending = restore_snapshot(dst_db, &dst_paths, &archive_path, &log)
            .await
            .unwrap();

        assert!(dst_paths.sidecar_bak().exists(), "previous file kept as .bak");
        assert!(!dst_paths.temp_restore().exists());

        // "Process restarted": reopen at the live path and verify the rows
        let reopened = Database::new(DbConfig::new(dst_paths.database()))
            .await
            .unwrap();

        let items = reopened.items().list(10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku, "W-1");
        assert_eq!(items[0].stock, 8); // post-sale stock came across

        let sales = reopened.sales().list(10).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].total_cents, 2000);

        assert_eq!(reopened.providers().list().await.unwrap().len(), 1);
        assert_eq!(reopened.sales().line_items(sales[0].id).await.unwrap().len(), 1);

        reopened.close().await;
    }

    #[tokio::test]
    async fn test_invalid_archive_leaves_live_store_intact() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::new(dir.path());
        let log = ErrorLog::new(paths.error_log());

        let db = Database::new(DbConfig::new(paths.database())).await.unwrap();
        db.items().add_item(&widget("KEEP")).await.unwrap();

        let not_a_backup = dir.path().join("garbage.zip");
        std::fs::write(&not_a_backup, b"definitely not a zip").unwrap();

        let err = restore_snapshot(db, &paths, &not_a_backup, &log)
            .await
            .unwrap_err();
        assert!(matches!(err, RestoreError::InvalidArchive(_)));

        assert!(!paths.sidecar_bak().exists(), "no swap happened");
        assert!(!paths.temp_restore().exists(), "no temp left behind");

        // The live store is still fully usable
        let reopened = Database::new(DbConfig::new(paths.database())).await.unwrap();
        let items = reopened.items().list(10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku, "KEEP");
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_second_restore_replaces_previous_bak() {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::new(dir.path());
        let log = ErrorLog::new(paths.error_log());

        let db = Database::new(DbConfig::new(paths.database())).await.unwrap();
        let archive_path = dir.path().join("backup.zip");
        export_snapshot(&db, &paths, &archive_path).await.unwrap();

        let _p1 = restore_snapshot(db, &paths, &archive_path, &log)
            .await
            .unwrap();

        let db2 = Database::new(DbConfig::new(paths.database())).await.unwrap();
        let _p2 = restore_snapshot(db2, &paths, &archive_path, &log)
            .await
            .unwrap();

        assert!(paths.sidecar_bak().exists());
    }
}
