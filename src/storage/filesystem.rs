//! File system helpers
//!
//! JSON record files written through a temporary file and renamed into place.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use log::warn;

/// Extension of the temporary file a record is written through
pub const TEMP_EXTENSION: &str = "json.tmp";

/// Create a directory
pub fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Serialize `value` as pretty JSON into `path`.
pub fn write_record<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    let temp_path = path.with_extension(TEMP_EXTENSION);
    fs::write(&temp_path, bytes)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Read one JSON record. `Ok(None)` if the file does not exist.
pub fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read every `*.json` record in `dir`. Unreadable records are logged and skipped.
pub fn read_records<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, StoreError> {
    let mut records = Vec::new();

    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        match read_record(&path) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable record {}: {}", path.display(), e),
        }
    }

    Ok(records)
}

/// Remove a file, treating a missing file as success
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// `<dir>/<stem>.json`
pub fn record_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}.json", stem))
}
