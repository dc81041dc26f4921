//! Record → table conversion
//!
//! Builds the rectangular table written to one worksheet. The column set is
//! computed once per export as the union of field codes across the records,
//! in the order the codes are first seen.

use crate::models::{FieldValue, Record};

/// One worksheet's worth of data
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    /// Worksheet name
    pub name: String,
    /// Header row (field codes)
    pub columns: Vec<String>,
    /// Data rows aligned with `columns`; `None` is an empty cell
    pub rows: Vec<Vec<Option<FieldValue>>>,
}

impl SheetTable {
    /// Build a table from records
    pub fn from_records(name: impl Into<String>, records: &[Record]) -> Self {
        let columns = column_union(records);

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|code| record.get(code).cloned())
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Number of data rows (the header row is not counted)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has neither columns nor rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

/// Field codes across `records` in first-seen order
pub fn column_union(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for code in record.codes() {
            if !columns.iter().any(|c| c == code) {
                columns.push(code.to_string());
            }
        }
    }
    columns
}
