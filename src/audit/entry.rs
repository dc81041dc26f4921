//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Category, PeriodKey, Record};
use crate::storage::CategoryCounts;

/// Kinds of audited operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A record was captured
    Append,
    /// A workbook was written
    Export,
    /// A workbook was published
    Publish,
    /// Records were discarded
    Clear,
    /// A period was closed
    Closeout,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Append => write!(f, "APPEND"),
            Operation::Export => write!(f, "EXPORT"),
            Operation::Publish => write!(f, "PUBLISH"),
            Operation::Clear => write!(f, "CLEAR"),
            Operation::Closeout => write!(f, "CLOSEOUT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Category affected, if the operation is category-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Report period involved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// One-line description
    pub summary: String,

    /// Structured payload (the captured record, per-category counts, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, summary: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            category: None,
            period: None,
            summary,
            details: None,
        }
    }

    /// A record was appended; `count` is the category's new size
    pub fn append(category: Category, record: &Record, count: usize) -> Self {
        let mut entry = Self::new(
            Operation::Append,
            format!("{} saved, {} in memory", category.label(), count),
        );
        entry.category = Some(category);
        entry.period = record.report_period().map(str::to_string);
        entry.details = serde_json::to_value(record).ok();
        entry
    }

    /// A workbook was written to disk
    pub fn export(
        category: Option<Category>,
        period: Option<&PeriodKey>,
        file_name: &str,
        rows: usize,
    ) -> Self {
        let mut entry = Self::new(Operation::Export, format!("{} ({} rows)", file_name, rows));
        entry.category = category;
        entry.period = period.map(PeriodKey::to_string);
        entry
    }

    /// A workbook was published
    pub fn publish(file_name: &str, locator: &str) -> Self {
        Self::new(Operation::Publish, format!("{} -> {}", file_name, locator))
    }

    /// Records were cleared; `None` means every category
    pub fn clear(category: Option<Category>, discarded: usize) -> Self {
        let target = category.map_or("all categories".to_string(), |c| c.to_string());
        let mut entry = Self::new(
            Operation::Clear,
            format!("{} cleared, {} records discarded", target, discarded),
        );
        entry.category = category;
        entry
    }

    /// A period was closed
    pub fn closeout(period: &PeriodKey, exported: &CategoryCounts) -> Self {
        let mut entry = Self::new(
            Operation::Closeout,
            format!("period {} closed, {} records exported", period, exported.total()),
        );
        entry.period = Some(period.to_string());
        entry.details = Some(serde_json::json!({
            "header": exported.header,
            "client": exported.client,
            "operation": exported.operation,
            "transaction": exported.transaction,
        }));
        entry
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation
        );

        if let Some(category) = &self.category {
            output.push_str(&format!(" {}", category));
        }
        if let Some(period) = &self.period {
            output.push_str(&format!(" [{}]", period));
        }

        output.push_str(&format!(": {}", self.summary));
        output
    }
}
