//! Storage layer for reporteria
//!
//! Holds the in-memory record store for a session plus the file helpers used
//! to write settings and exported workbooks safely.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use records::RecordLog;

use crate::error::ReportError;
use crate::models::{Category, Record};

/// Per-category record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub header: usize,
    pub client: usize,
    pub operation: usize,
    pub transaction: usize,
}

impl CategoryCounts {
    /// Count for one category
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Header => self.header,
            Category::Client => self.client,
            Category::Operation => self.operation,
            Category::Transaction => self.transaction,
        }
    }

    /// Set the count for one category
    pub fn set(&mut self, category: Category, count: usize) {
        match category {
            Category::Header => self.header = count,
            Category::Client => self.client = count,
            Category::Operation => self.operation = count,
            Category::Transaction => self.transaction = count,
        }
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.header + self.client + self.operation + self.transaction
    }
}

/// The session's record store: one append-only log per category
///
/// Owned by a session and passed explicitly to every operation; nothing
/// here is persisted.
#[derive(Debug, Default)]
pub struct RecordStore {
    pub headers: RecordLog,
    pub clients: RecordLog,
    pub operations: RecordLog,
    pub transactions: RecordLog,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The log backing a category
    pub fn log(&self, category: Category) -> &RecordLog {
        match category {
            Category::Header => &self.headers,
            Category::Client => &self.clients,
            Category::Operation => &self.operations,
            Category::Transaction => &self.transactions,
        }
    }

    /// Append a record to a category and return the category's new count
    pub fn append(&self, category: Category, record: Record) -> Result<usize, ReportError> {
        self.log(category).append(record)
    }

    /// Copy of a category's records in insertion order
    pub fn snapshot(&self, category: Category) -> Result<Vec<Record>, ReportError> {
        self.log(category).snapshot()
    }

    /// Remove every record of a category
    pub fn clear(&self, category: Category) -> Result<(), ReportError> {
        self.log(category).clear()
    }

    /// Remove every record of every category
    pub fn clear_all(&self) -> Result<(), ReportError> {
        for category in Category::ALL {
            self.clear(category)?;
        }
        Ok(())
    }

    /// Number of records in a category
    pub fn len(&self, category: Category) -> Result<usize, ReportError> {
        self.log(category).len()
    }

    /// Record counts for every category
    pub fn counts(&self) -> Result<CategoryCounts, ReportError> {
        let mut counts = CategoryCounts::default();
        for category in Category::ALL {
            counts.set(category, self.len(category)?);
        }
        Ok(counts)
    }

    /// Check if every category is empty
    pub fn is_empty(&self) -> Result<bool, ReportError> {
        Ok(self.counts()?.total() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pdr: &str) -> Record {
        Record::new().with("CDR", "AB1").with("PDR", pdr)
    }

    #[test]
    fn test_categories_are_independent() {
        let store = RecordStore::new();
        store.append(Category::Header, record("20240201")).unwrap();
        store.append(Category::Transaction, record("20240201")).unwrap();
        store.append(Category::Transaction, record("20240202")).unwrap();

        let counts = store.counts().unwrap();
        assert_eq!(counts.header, 1);
        assert_eq!(counts.client, 0);
        assert_eq!(counts.operation, 0);
        assert_eq!(counts.transaction, 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_snapshot_length_matches_appends() {
        let store = RecordStore::new();
        for i in 0..7 {
            let count = store.append(Category::Client, record("20240201")).unwrap();
            assert_eq!(count, i + 1);
        }
        assert_eq!(store.snapshot(Category::Client).unwrap().len(), 7);

        store.clear(Category::Client).unwrap();
        assert_eq!(store.snapshot(Category::Client).unwrap().len(), 0);
    }

    #[test]
    fn test_clear_one_category_leaves_others() {
        let store = RecordStore::new();
        store.append(Category::Header, record("20240201")).unwrap();
        store.append(Category::Operation, record("20240201")).unwrap();

        store.clear(Category::Header).unwrap();

        assert_eq!(store.len(Category::Header).unwrap(), 0);
        assert_eq!(store.len(Category::Operation).unwrap(), 1);
    }

    #[test]
    fn test_clear_all() {
        let store = RecordStore::new();
        for category in Category::ALL {
            store.append(category, record("20240201")).unwrap();
        }

        store.clear_all().unwrap();
        assert!(store.is_empty().unwrap());

        // clearing an empty store is fine
        store.clear_all().unwrap();
    }
}
