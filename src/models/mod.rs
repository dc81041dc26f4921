//! Core data models for reporteria
//!
//! Records, the categories they belong to, the per-category field schemas and
//! the period keys used to group them.

pub mod category;
pub mod period;
pub mod record;
pub mod schema;

pub use category::Category;
pub use period::{parse_report_date, PeriodKey};
pub use record::{FieldValue, Record};
pub use schema::{FieldKind, FieldSpec};
