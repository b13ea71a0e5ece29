//! # Durable Error Log
//!
//! An append-only plain-text log beside the database file. This is separate
//! from `tracing`: tracing output is for developers and vanishes with the
//! process, while `error_log.txt` survives for the user's diagnostics pane
//! and for support.
//!
//! ## Entry Format
//! ```text
//! [2026-08-29 14:03:11] RESTORE: Permission denied during file swap: ...
//! --------------------------------------------------
//! ```
//!
//! Writes are best-effort: a log that cannot be written must never turn a
//! recoverable situation into a panic, so failures are reported through
//! `tracing::warn!` and swallowed.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Timestamp format used for log entries.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator drawn after every entry.
const SEPARATOR_LEN: usize = 50;

/// Handle to the append-only error log file.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    /// Creates a log handle for the given file path. The file is created on
    /// first append, not here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ErrorLog { path: path.into() }
    }

    /// Appends one entry: local timestamp, a context label (e.g. `RESTORE`,
    /// `EXPORT`), the message, and a separator line.
    ///
    /// Best-effort: failures are warned about and swallowed.
    pub fn append(&self, context: &str, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let entry = format!(
            "[{timestamp}] {context}: {message}\n{}\n",
            "-".repeat(SEPARATOR_LEN)
        );

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(entry.as_bytes()));

        if let Err(e) = result {
            warn!(
                path = %self.path.display(),
                error = %e,
                "Could not append to error log"
            );
        }
    }

    /// Reads the whole log. Returns an empty string if the file does not
    /// exist yet.
    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap_or_default()
    }

    /// Returns the last `n` entries (separator-delimited blocks), oldest
    /// first. For the diagnostics pane.
    pub fn tail(&self, n: usize) -> Vec<String> {
        let content = self.read();
        let separator = format!("{}\n", "-".repeat(SEPARATOR_LEN));

        let entries: Vec<String> = content
            .split(&separator)
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(str::to_string)
            .collect();

        let skip = entries.len().saturating_sub(n);
        entries.into_iter().skip(skip).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error_log.txt"));

        log.append("RESTORE", "swap failed: permission denied");

        let content = log.read();
        assert!(content.contains("RESTORE: swap failed: permission denied"));
        assert!(content.contains(&"-".repeat(50)));
    }

    #[test]
    fn test_entries_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error_log.txt"));

        log.append("EXPORT", "first");
        log.append("EXPORT", "second");

        let entries = log.tail(10);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("first"));
        assert!(entries[1].contains("second"));
    }

    #[test]
    fn test_tail_limits_to_newest() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error_log.txt"));

        for i in 0..5 {
            log.append("IMPORT", &format!("entry {i}"));
        }

        let entries = log.tail(2);
        assert_eq!(entries.len(), 2);
        assert!(entries[1].contains("entry 4"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("nope.txt"));

        assert!(log.read().is_empty());
        assert!(log.tail(3).is_empty());
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        // A directory path cannot be opened for appending
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path());

        log.append("RESTORE", "this write fails silently");
    }
}
