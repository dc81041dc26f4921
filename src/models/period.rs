//! Report period keys
//!
//! A period key is the `YYYYMM` prefix of a record's report period. It is
//! never stored on records; it is derived on demand and threaded explicitly
//! into every filtering, export and closeout call.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReportError, ReportResult};

/// A validated `YYYYMM` period key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    /// Period key for the month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!("{:04}{:02}", date.year(), date.month()))
    }

    /// Period key for the current month
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Parse a period key
    ///
    /// Accepts `YYYYMM` and `YYYY-MM`.
    pub fn parse(s: &str) -> ReportResult<Self> {
        let compact: String = s.trim().chars().filter(|c| *c != '-').collect();

        if compact.len() != 6 || !compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(ReportError::Validation(format!(
                "Invalid period: '{}'. Use YYYYMM or YYYY-MM",
                s
            )));
        }

        let month: u32 = compact[4..].parse().unwrap_or(0);
        if !(1..=12).contains(&month) {
            return Err(ReportError::Validation(format!(
                "Invalid month in period '{}'",
                s
            )));
        }

        Ok(Self(compact))
    }

    /// The raw `YYYYMM` string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a report date given as `YYYY-MM-DD` or `YYYYMMDD`
pub fn parse_report_date(s: &str) -> ReportResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|_| {
            ReportError::Validation(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD or YYYYMMDD",
                s
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(PeriodKey::from_date(date).as_str(), "202402");
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(PeriodKey::parse("202402").unwrap().as_str(), "202402");
        assert_eq!(PeriodKey::parse("2024-02").unwrap().as_str(), "202402");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PeriodKey::parse("2024").is_err());
        assert!(PeriodKey::parse("202413").is_err());
        assert!(PeriodKey::parse("202400").is_err());
        assert!(PeriodKey::parse("abcdef").is_err());
    }

    #[test]
    fn test_parse_report_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_report_date("2024-01-31").unwrap(), expected);
        assert_eq!(parse_report_date("20240131").unwrap(), expected);
        assert!(parse_report_date("31/01/2024").is_err());
    }
}
