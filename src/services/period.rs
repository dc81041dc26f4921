//! Period filtering
//!
//! Narrows a category's records to one reporting month by comparing the
//! `YYYYMM` prefix of each record's report period with the target key.

use crate::models::{PeriodKey, Record};

/// Records whose report period falls in `period`, in original order
///
/// Records without a usable report period are skipped silently. The result
/// is neither deduplicated nor sorted.
pub fn filter_by_period(records: &[Record], period: &PeriodKey) -> Vec<Record> {
    records
        .iter()
        .filter(|record| in_period(record, period))
        .cloned()
        .collect()
}

/// Whether a record belongs to `period`
pub fn in_period(record: &Record, period: &PeriodKey) -> bool {
    record.period_key() == Some(period.as_str())
}
