//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};

use super::entry::AuditEntry;

/// Writes audit entries to the audit log file, one JSON object per line
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> ReportResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ReportError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| ReportError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| ReportError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| ReportError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Append an entry, downgrading failures to a warning
    ///
    /// The audit trail never blocks the action it describes.
    pub fn record(&self, entry: &AuditEntry) {
        if let Err(e) = self.log(entry) {
            tracing::warn!(
                path = %self.log_path.display(),
                operation = %entry.operation,
                "audit entry not written: {}",
                e
            );
        }
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> ReportResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ReportError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                ReportError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                ReportError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries
    pub fn read_recent(&self, count: usize) -> ReportResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
