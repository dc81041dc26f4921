//! XLSX workbook rendering
//!
//! Serializes sheet tables with rust_xlsxwriter. The workbook's document
//! properties carry a fixed creation timestamp, so rendering the same tables
//! twice yields the same bytes.

use rust_xlsxwriter::{ColNum, DocProperties, ExcelDateTime, Format, RowNum, Workbook};

use super::table::SheetTable;
use super::{CategoryRecords, Exporter};
use crate::error::{ReportError, ReportResult};
use crate::models::{Category, FieldValue, Record};

/// Sheet name used for single-category workbooks
pub const SINGLE_SHEET_NAME: &str = "Sheet1";

/// Exporter producing `.xlsx` workbooks
#[derive(Debug, Clone, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self
    }

    /// Tables of a single-sheet workbook
    pub fn single_sheet(records: &[Record]) -> Vec<SheetTable> {
        vec![SheetTable::from_records(SINGLE_SHEET_NAME, records)]
    }

    /// Tables of a consolidated workbook: one per category, always all four
    pub fn consolidated_sheets(sections: &CategoryRecords) -> Vec<SheetTable> {
        Category::ALL
            .iter()
            .map(|category| {
                let records = sections.get(category).map(Vec::as_slice).unwrap_or(&[]);
                SheetTable::from_records(category.canonical_name(), records)
            })
            .collect()
    }

    /// Render tables into workbook bytes
    pub fn render(sheets: &[SheetTable]) -> ReportResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
        let properties = DocProperties::new().set_creation_datetime(&created);
        workbook.set_properties(&properties);

        let header = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;

            for (c, code) in sheet.columns.iter().enumerate() {
                worksheet.write_string_with_format(0, column_index(c)?, code, &header)?;
            }

            for (r, row) in sheet.rows.iter().enumerate() {
                let row_num = row_index(r + 1)?;
                for (c, cell) in row.iter().enumerate() {
                    let col = column_index(c)?;
                    match cell {
                        Some(FieldValue::Text(text)) => {
                            worksheet.write_string(row_num, col, text)?;
                        }
                        Some(FieldValue::Integer(n)) => {
                            worksheet.write_number(row_num, col, *n as f64)?;
                        }
                        Some(FieldValue::Decimal(d)) => {
                            worksheet.write_number(row_num, col, *d)?;
                        }
                        None => {}
                    }
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

impl Exporter for XlsxExporter {
    fn export_single(&self, records: &[Record]) -> ReportResult<Vec<u8>> {
        Self::render(&Self::single_sheet(records))
    }

    fn export_consolidated(&self, sections: &CategoryRecords) -> ReportResult<Vec<u8>> {
        Self::render(&Self::consolidated_sheets(sections))
    }
}

fn column_index(index: usize) -> ReportResult<ColNum> {
    ColNum::try_from(index)
        .map_err(|_| ReportError::Export(format!("Too many columns: {}", index + 1)))
}

fn row_index(index: usize) -> ReportResult<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| ReportError::Export(format!("Too many rows: {}", index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

    fn record(pdr: &str, n: i64) -> Record {
        Record::new()
            .with("CDR", "AB1")
            .with("PDR", pdr)
            .with("N", n)
            .with("V", 12.5)
    }

    #[test]
    fn test_empty_export_is_a_workbook() {
        let bytes = XlsxExporter::new().export_single(&[]).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));

        let sheets = XlsxExporter::single_sheet(&[]);
        assert_eq!(sheets.len(), 1);
        assert!(sheets[0].is_empty());
    }

    #[test]
    fn test_export_is_deterministic() {
        let records = vec![record("20240201", 1), record("20240203", 2)];
        let exporter = XlsxExporter::new();

        let first = exporter.export_single(&records).unwrap();
        let second = exporter.export_single(&records).unwrap();
        assert!(first.starts_with(ZIP_MAGIC));
        assert_eq!(first, second);
    }

    #[test]
    fn test_consolidated_has_every_category() {
        let mut sections = CategoryRecords::new();
        sections.insert(Category::Header, vec![record("20240201", 1)]);
        sections.insert(Category::Transaction, vec![record("20240201", 2), record("20240202", 3)]);

        let sheets = XlsxExporter::consolidated_sheets(&sections);
        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["CABECERA", "DETALLECLIENTE", "DETALLEOPERACION", "DETALLETRANSACCION"]
        );
        let rows: Vec<_> = sheets.iter().map(SheetTable::row_count).collect();
        assert_eq!(rows, vec![1, 0, 0, 2]);

        let bytes = XlsxExporter::new().export_consolidated(&sections).unwrap();
        assert!(bytes.starts_with(ZIP_MAGIC));
    }

    #[test]
    fn test_consolidated_is_deterministic() {
        let mut sections = CategoryRecords::new();
        sections.insert(Category::Client, vec![record("20240201", 1)]);

        let exporter = XlsxExporter::new();
        assert_eq!(
            exporter.export_consolidated(&sections).unwrap(),
            exporter.export_consolidated(&sections).unwrap()
        );
    }

    #[test]
    fn test_default_category_export_matches_single() {
        let records = vec![record("20240201", 1)];
        let exporter = XlsxExporter::new();

        assert_eq!(
            exporter.export_category(Category::Operation, &records).unwrap(),
            exporter.export_single(&records).unwrap()
        );
    }
}
