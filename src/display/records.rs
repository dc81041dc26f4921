//! Record display formatting
//!
//! Formats captured records and store counts for terminal output.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::export::SheetTable;
use crate::models::{Category, Record};
use crate::storage::CategoryCounts;

/// Format a category's records as a table, one column per field code
pub fn format_record_list(category: Category, records: &[Record]) -> String {
    if records.is_empty() {
        return format!("No {} records in memory.", category.label());
    }

    let table = SheetTable::from_records(category.canonical_name(), records);

    let mut builder = Builder::default();
    let mut header = vec!["#".to_string()];
    header.extend(table.columns.iter().cloned());
    builder.push_record(header);

    for (i, row) in table.rows.iter().enumerate() {
        let mut cells = vec![(i + 1).to_string()];
        cells.extend(
            row.iter()
                .map(|cell| cell.as_ref().map(|v| v.to_string()).unwrap_or_default()),
        );
        builder.push_record(cells);
    }

    let mut output = builder.build().with(Style::psql()).to_string();
    output.push_str(&format!("\n\nTotal: {} records", records.len()));
    output
}

/// Format per-category counts of the store
pub fn format_status(
    cdr: Option<&str>,
    report_date: Option<&str>,
    counts: &CategoryCounts,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Registry code: {}\n", cdr.unwrap_or("(not set)")));
    output.push_str(&format!("Report date:   {}\n", report_date.unwrap_or("(not set)")));
    output.push('\n');

    output.push_str(&format!("{:<20}  {:>8}\n", "Category", "Records"));
    output.push_str(&format!("{:-<20}  {:->8}\n", "", ""));
    for category in Category::ALL {
        output.push_str(&format!(
            "{:<20}  {:>8}\n",
            category.canonical_name(),
            counts.get(category)
        ));
    }
    output.push_str(&format!("{:-<20}  {:->8}\n", "", ""));
    output.push_str(&format!("{:<20}  {:>8}\n", "TOTAL", counts.total()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_list() {
        let output = format_record_list(Category::Client, &[]);
        assert_eq!(output, "No Cliente records in memory.");
    }

    #[test]
    fn test_format_record_list() {
        let records = vec![
            Record::new().with("IDE", "0102").with("IMT", 12.5),
            Record::new().with("IDE", "0304").with("IMT", 3.0),
        ];
        let output = format_record_list(Category::Client, &records);

        assert!(output.contains("IDE"));
        assert!(output.contains("IMT"));
        assert!(output.contains("0304"));
        assert!(output.contains("12.50"));
        assert!(output.contains("Total: 2 records"));
    }

    #[test]
    fn test_format_status() {
        let counts = CategoryCounts {
            header: 1,
            client: 0,
            operation: 2,
            transaction: 4,
        };
        let output = format_status(Some("AB1"), None, &counts);

        assert!(output.contains("Registry code: AB1"));
        assert!(output.contains("Report date:   (not set)"));
        assert!(output.contains("DETALLEOPERACION"));
        assert!(output.lines().last().unwrap().ends_with("7"));
    }
}
