//! File I/O utilities with atomic writes
//!
//! Exported workbooks and the settings file are written to a temporary file
//! next to the target and renamed into place, so a failed write never leaves
//! a truncated file behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ReportError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ReportError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| ReportError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ReportError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ReportError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| ReportError::Json(format!("Failed to serialize data: {}", e)))?;
    write_bytes_atomic(path, &bytes)
}

/// Write raw bytes to a file atomically (write to temp, then rename)
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), ReportError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                ReportError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| ReportError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| ReportError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ReportError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ReportError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ReportError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
