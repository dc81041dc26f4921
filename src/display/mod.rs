//! Display formatting for terminal output
//!
//! Provides utilities for formatting records, store counts, schemas and
//! closeout reports for terminal display.

pub mod closeout;
pub mod records;
pub mod schema;

pub use closeout::format_closeout_report;
pub use records::{format_record_list, format_status};
pub use schema::{format_all_schemas, format_schema};
