//! Export module for reporteria
//!
//! Turns record collections into spreadsheet workbooks:
//! - `table`: record → rectangular table conversion
//! - `xlsx`: workbook rendering
//!
//! The `Exporter` trait is the seam the closeout orchestrator depends on.

pub mod table;
pub mod xlsx;

pub use table::{column_union, SheetTable};
pub use xlsx::XlsxExporter;

use std::collections::BTreeMap;

use crate::error::ReportResult;
use crate::models::{Category, PeriodKey, Record};

/// Records grouped by category
pub type CategoryRecords = BTreeMap<Category, Vec<Record>>;

/// File name of the consolidated workbook
pub const CONSOLIDATED_FILE_NAME: &str = "reporteria_general.xlsx";

/// Serializes records into workbook bytes
pub trait Exporter: Send + Sync {
    /// One sheet with the given records
    fn export_single(&self, records: &[Record]) -> ReportResult<Vec<u8>>;

    /// One sheet per category, named with the category's canonical name
    ///
    /// Categories missing from `sections` still get an empty sheet.
    fn export_consolidated(&self, sections: &CategoryRecords) -> ReportResult<Vec<u8>>;

    /// Per-category export used at closeout
    fn export_category(&self, _category: Category, records: &[Record]) -> ReportResult<Vec<u8>> {
        self.export_single(records)
    }
}

/// File name of a per-category export: `<CATEGORY>_<CDR>_<YYYYMM>.xlsx`
pub fn category_file_name(category: Category, cdr: &str, period: &PeriodKey) -> String {
    format!("{}_{}_{}.xlsx", category.canonical_name(), cdr, period)
}

/// An exported file held in memory
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Category exported, `None` for the consolidated workbook
    pub category: Option<Category>,
    /// Target file name
    pub file_name: String,
    /// Data rows written
    pub rows: usize,
    /// Workbook bytes
    pub bytes: Vec<u8>,
}
