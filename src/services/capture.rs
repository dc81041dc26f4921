//! Record capture service
//!
//! Turns form input into a record of a category's schema and appends it to
//! the store. Registry code and report period come from the capture context
//! rather than from the form, so every category of a submission shares them.

use chrono::NaiveDate;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ReportError, ReportResult};
use crate::models::schema::{check_registry_code, REGISTRY_CODE, REPORT_PERIOD};
use crate::models::{Category, FieldValue, PeriodKey, Record};
use crate::storage::RecordStore;

/// Registry code and report date shared by every captured record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureContext {
    cdr: String,
    report_date: NaiveDate,
}

impl CaptureContext {
    /// Create a context, checking the registry code
    pub fn new(cdr: impl Into<String>, report_date: NaiveDate) -> ReportResult<Self> {
        let cdr = cdr.into().trim().to_string();
        check_registry_code(&cdr)?;
        Ok(Self { cdr, report_date })
    }

    pub fn cdr(&self) -> &str {
        &self.cdr
    }

    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    /// Report period as stored on records (`YYYYMMDD`)
    pub fn pdr(&self) -> String {
        self.report_date.format("%Y%m%d").to_string()
    }

    /// Period key of the report date
    pub fn period(&self) -> PeriodKey {
        PeriodKey::from_date(self.report_date)
    }
}

/// Split a `FIELD=VALUE` argument
///
/// Field codes are case-insensitive; the value may be empty.
pub fn parse_assignment(arg: &str) -> ReportResult<(String, String)> {
    let (code, value) = arg.split_once('=').ok_or_else(|| {
        ReportError::Validation(format!("Expected FIELD=VALUE, got '{}'", arg))
    })?;

    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ReportError::Validation(format!("Missing field code in '{}'", arg)));
    }
    Ok((code, value.to_string()))
}

/// Result of a successful capture
#[derive(Debug, Clone)]
pub struct Captured {
    pub record: Record,
    /// Category size after the append
    pub count: usize,
}

/// Service for capturing records into a store
pub struct CaptureService<'a> {
    store: &'a RecordStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> CaptureService<'a> {
    /// Create a new capture service
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store, audit: None }
    }

    /// Record captures in an audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Build a record for `category` from form input
    ///
    /// Fields are laid out in schema order. Omitted fields get their
    /// defaults; unknown codes and the context fields are rejected.
    pub fn build_record(
        category: Category,
        context: &CaptureContext,
        inputs: &[(String, String)],
    ) -> ReportResult<Record> {
        for (code, _) in inputs {
            match category.field(code) {
                None => {
                    return Err(ReportError::Validation(format!(
                        "{} has no field '{}'",
                        category.label(),
                        code
                    )))
                }
                Some(spec) if spec.is_context() => {
                    return Err(ReportError::Validation(format!(
                        "{} comes from the session context; set it with `use`",
                        code
                    )))
                }
                Some(_) => {}
            }
        }

        let mut record = Record::new();
        for spec in category.schema() {
            let value = if spec.code == REGISTRY_CODE {
                FieldValue::Text(context.cdr().to_string())
            } else if spec.code == REPORT_PERIOD {
                FieldValue::Text(context.pdr())
            } else {
                // last assignment wins
                match inputs.iter().rev().find(|(code, _)| code == spec.code) {
                    Some((_, raw)) => spec.parse_value(raw)?,
                    None => spec.default_value(context.report_date()),
                }
            };
            record.insert(spec.code, value);
        }

        Ok(record)
    }

    /// Build a record and append it to the store
    pub fn capture(
        &self,
        category: Category,
        context: &CaptureContext,
        inputs: &[(String, String)],
    ) -> ReportResult<Captured> {
        let record = Self::build_record(category, context, inputs)?;
        let count = self.store.append(category, record.clone())?;

        tracing::debug!(category = %category, count, "record captured");
        if let Some(audit) = self.audit {
            audit.record(&AuditEntry::append(category, &record, count));
        }

        Ok(Captured { record, count })
    }
}
