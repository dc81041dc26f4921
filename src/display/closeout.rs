//! Closeout report formatting

use crate::models::Category;
use crate::services::CloseoutReport;

/// Format the outcome of a period closeout
pub fn format_closeout_report(report: &CloseoutReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Period {} closed for registry code {}\n",
        report.period, report.cdr
    ));
    output.push('\n');

    for category in Category::ALL {
        output.push_str(&format!(
            "  {:<20} {:>6} rows\n",
            category.canonical_name(),
            report.exported.get(category)
        ));
    }
    if let Some(consolidated) = report.consolidated() {
        output.push_str(&format!(
            "  {:<20} {:>6} rows ({})\n",
            "Consolidated",
            consolidated.rows,
            report.consolidated_scope
        ));
    }

    if !report.written.is_empty() {
        output.push('\n');
        output.push_str("Files:\n");
        for path in &report.written {
            output.push_str(&format!("  {}\n", path.display()));
        }
    }

    if !report.published.is_empty() {
        output.push('\n');
        output.push_str("Published:\n");
        for published in &report.published {
            output.push_str(&format!("  {} -> {}\n", published.file_name, published.locator));
        }
    }

    if !report.warnings.is_empty() {
        output.push('\n');
        for warning in &report.warnings {
            output.push_str(&format!(
                "Warning: {} was not published: {}\n",
                warning.file_name, warning.message
            ));
        }
    }

    output.push('\n');
    output.push_str("Records cleared; ready for the next period.\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PeriodKey, Record};
    use crate::services::PeriodCloseout;
    use crate::storage::RecordStore;

    #[test]
    fn test_format_closeout_report() {
        let store = RecordStore::new();
        let record = Record::new().with("CDR", "AB1").with("PDR", "20240205");
        store.append(Category::Operation, record).unwrap();

        let period = PeriodKey::parse("202402").unwrap();
        let report = PeriodCloseout::xlsx()
            .close_period(&store, "AB1", &period)
            .unwrap();

        let output = format_closeout_report(&report);
        assert!(output.starts_with("Period 202402 closed for registry code AB1"));
        assert!(output.contains("DETALLEOPERACION"));
        assert!(output.contains("(full history)"));
        assert!(!output.contains("Warning"));
    }
}
