//! Publishing of exported files
//!
//! A publisher takes an exported workbook and makes it available somewhere
//! else, returning a locator the operator can share. Remote storage clients
//! implement `Publisher`; `DirectoryPublisher` drops the files into a local
//! directory (a synced folder, a mounted share).
//!
//! Publishing is best effort: a failure is reported to the caller but never
//! undoes the local export.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::write_bytes_atomic;

/// Errors raised by publishers
#[derive(Error, Debug)]
pub enum PublishError {
    /// The remote side could not be reached or refused the upload
    #[error("transport error: {0}")]
    Transport(String),

    /// Local I/O failed while staging the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Uploads an exported file and returns an access locator
pub trait Publisher: Send + Sync {
    fn publish(&self, bytes: &[u8], file_name: &str) -> Result<String, PublishError>;
}

/// Publisher that copies files into a target directory
#[derive(Debug, Clone)]
pub struct DirectoryPublisher {
    target_dir: PathBuf,
}

impl DirectoryPublisher {
    /// Create a publisher writing into `target_dir`
    pub fn new(target_dir: PathBuf) -> Self {
        Self { target_dir }
    }

    /// Directory files are published into
    pub fn target_dir(&self) -> &PathBuf {
        &self.target_dir
    }
}

impl Publisher for DirectoryPublisher {
    fn publish(&self, bytes: &[u8], file_name: &str) -> Result<String, PublishError> {
        let path = self.target_dir.join(file_name);
        write_bytes_atomic(&path, bytes).map_err(|e| PublishError::Transport(e.to_string()))?;

        let path = path.canonicalize()?;
        Ok(format!("file://{}", path.display()))
    }
}
