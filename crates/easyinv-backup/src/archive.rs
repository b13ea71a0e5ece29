//! # Backup Archive Format
//!
//! The backup format is a deflate zip with a single entry named
//! `inventory.db`, regardless of what the user names the `.zip` file.
//!
//! Reading is more permissive than writing: any entry whose name ends in
//! `.db` is accepted, so archives produced by hand (or by older builds with
//! a different internal name) still restore.

use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::RestoreError;

/// Entry name written into every backup archive.
pub const ARCHIVE_ENTRY_NAME: &str = "inventory.db";

/// Packs a database file into a single-entry deflate zip at `dest`.
pub fn pack_database(db_file: &Path, dest: &Path) -> Result<(), zip::result::ZipError> {
    debug!(
        src = %db_file.display(),
        dest = %dest.display(),
        "Packing database into archive"
    );

    let mut source = File::open(db_file)?;
    let mut writer = ZipWriter::new(File::create(dest)?);

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer.start_file(ARCHIVE_ENTRY_NAME, options)?;
    io::copy(&mut source, &mut writer)?;
    writer.finish()?;

    info!(dest = %dest.display(), "Backup archive written");
    Ok(())
}

/// Finds the database entry in `archive` and extracts it to `dest`.
///
/// ## Returns
/// * `Err(RestoreError::InvalidArchive)` - not a zip, or no `.db` entry.
///   Nothing is written in that case.
pub fn extract_database(archive: &Path, dest: &Path) -> Result<(), RestoreError> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)
        .map_err(|e| RestoreError::InvalidArchive(format!("not a zip archive: {e}")))?;

    let entry_name = zip
        .file_names()
        .find(|name| name.ends_with(".db"))
        .map(str::to_string)
        .ok_or_else(|| RestoreError::InvalidArchive("no .db entry found".to_string()))?;

    debug!(entry = %entry_name, dest = %dest.display(), "Extracting database entry");

    let mut entry = zip.by_name(&entry_name)?;
    let mut out = File::create(dest)?;
    io::copy(&mut entry, &mut out)?;

    Ok(())
}
