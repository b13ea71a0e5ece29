//! # Store Paths
//!
//! Every filename convention of the store, derived from one data directory.
//!
//! ```text
//! <data_dir>/
//! ├── inventory.db          ← the live database
//! ├── inventory.db.bak      ← previous live file, kept by the last restore
//! ├── temp_backup.db        ← scratch: VACUUM INTO target during export
//! ├── temp_restore_inv.db   ← scratch: extracted archive entry during restore
//! └── error_log.txt         ← append-only durable error log
//! ```
//!
//! There is no ambient path detection: callers construct a `StorePaths`
//! explicitly and hand it to the engines. Temp files live in the data
//! directory itself so the restore rename never crosses a filesystem
//! boundary (rename must be atomic).

use std::path::{Path, PathBuf};

/// The live database filename.
pub const DB_FILE: &str = "inventory.db";

/// Sidecar kept beside the live file by a restore.
pub const BAK_FILE: &str = "inventory.db.bak";

/// Scratch file used while exporting a snapshot.
pub const TEMP_BACKUP_FILE: &str = "temp_backup.db";

/// Scratch file used while extracting an archive entry.
pub const TEMP_RESTORE_FILE: &str = "temp_restore_inv.db";

/// The durable error log filename.
pub const ERROR_LOG_FILE: &str = "error_log.txt";

/// Filename conventions rooted at one data directory.
#[derive(Debug, Clone)]
pub struct StorePaths {
    data_dir: PathBuf,
}

impl StorePaths {
    /// Creates store paths rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorePaths {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory itself.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the live database file.
    pub fn database(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// Path of the `.bak` sidecar left by the last restore.
    pub fn sidecar_bak(&self) -> PathBuf {
        self.data_dir.join(BAK_FILE)
    }

    /// Scratch path for the snapshot export.
    pub fn temp_backup(&self) -> PathBuf {
        self.data_dir.join(TEMP_BACKUP_FILE)
    }

    /// Scratch path for the restore extraction. Same directory as the live
    /// file, so the final rename is atomic.
    pub fn temp_restore(&self) -> PathBuf {
        self.data_dir.join(TEMP_RESTORE_FILE)
    }

    /// Path of the append-only error log.
    pub fn error_log(&self) -> PathBuf {
        self.data_dir.join(ERROR_LOG_FILE)
    }
}
