//! Append-only record log for a single category
//!
//! Records are kept in insertion order behind a lock. Reads hand out copies,
//! so a snapshot taken for export never observes a later append.

use std::sync::RwLock;

use crate::error::ReportError;
use crate::models::Record;

/// Ordered, append-only collection of records
#[derive(Debug, Default)]
pub struct RecordLog {
    data: RwLock<Vec<Record>>,
}

impl RecordLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return the new number of records
    ///
    /// Duplicates are accepted.
    pub fn append(&self, record: Record) -> Result<usize, ReportError> {
        let mut data = self.data.write().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.push(record);
        Ok(data.len())
    }

    /// Copy of all records in insertion order
    pub fn snapshot(&self) -> Result<Vec<Record>, ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Remove every record
    pub fn clear(&self) -> Result<(), ReportError> {
        let mut data = self.data.write().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        Ok(())
    }

    /// Number of records
    pub fn len(&self) -> Result<usize, ReportError> {
        let data = self.data.read().map_err(|e| {
            ReportError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> Result<bool, ReportError> {
        Ok(self.len()? == 0)
    }
}
