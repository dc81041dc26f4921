//! Error types for reporteria
//!
//! Provides a unified error type for all report operations using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for reporteria operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Captured input could not be turned into a record
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store errors (poisoned locks and the like)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A spreadsheet could not be produced
    #[error("Export error: {0}")]
    Export(String),

    /// A closeout was requested while another one is still running
    #[error("Closeout already in progress")]
    ReentrancyConflict,
}

impl ReportError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for reporteria operations
pub type ReportResult<T> = Result<T, ReportError>;
