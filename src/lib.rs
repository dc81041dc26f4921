//! Reporteria - monthly regulatory report capture and closeout
//!
//! This library captures the records of a monthly regulatory submission,
//! exports them as xlsx workbooks, and closes each period by exporting,
//! publishing and clearing the captured records.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, path management and diagnostic logging
//! - `error`: Custom error types
//! - `models`: Categories, field schemas, records and period keys
//! - `storage`: In-memory record store and atomic file writes
//! - `export`: Record tables and xlsx workbook rendering
//! - `publish`: Publisher adapters for exported files
//! - `services`: Capture, period filtering, export and closeout
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Session shell and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use reporteria::models::{Category, PeriodKey};
//! use reporteria::services::PeriodCloseout;
//! use reporteria::storage::RecordStore;
//!
//! let store = RecordStore::new();
//! // ... capture records ...
//! let report = PeriodCloseout::xlsx().close_period(&store, "AB123", &PeriodKey::current())?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod publish;
pub mod services;
pub mod storage;

pub use error::{ReportError, ReportResult};
