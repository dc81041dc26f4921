//! On-demand exports
//!
//! Exports outside of a closeout: one category for the month, or the
//! consolidated workbook. Neither touches the store's contents.

use std::path::{Path, PathBuf};

use crate::config::ConsolidatedScope;
use crate::error::{ReportError, ReportResult};
use crate::export::{
    category_file_name, CategoryRecords, ExportArtifact, Exporter, CONSOLIDATED_FILE_NAME,
};
use crate::models::schema::check_registry_code;
use crate::models::{Category, PeriodKey, Record};
use crate::storage::{write_bytes_atomic, RecordStore};

use super::period::filter_by_period;

/// Export one category's period-filtered records
pub fn category_artifact<E: Exporter + ?Sized>(
    exporter: &E,
    category: Category,
    cdr: &str,
    period: &PeriodKey,
    in_period: &[Record],
) -> ReportResult<ExportArtifact> {
    let bytes = exporter.export_category(category, in_period)?;
    Ok(ExportArtifact {
        category: Some(category),
        file_name: category_file_name(category, cdr, period),
        rows: in_period.len(),
        bytes,
    })
}

/// Export the consolidated workbook
pub fn consolidated_artifact<E: Exporter + ?Sized>(
    exporter: &E,
    sections: &CategoryRecords,
) -> ReportResult<ExportArtifact> {
    let bytes = exporter.export_consolidated(sections)?;
    Ok(ExportArtifact {
        category: None,
        file_name: CONSOLIDATED_FILE_NAME.to_string(),
        rows: sections.values().map(Vec::len).sum(),
        bytes,
    })
}

/// Write an artifact into `dir`, returning the file's path
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> ReportResult<PathBuf> {
    let path = dir.join(&artifact.file_name);
    write_bytes_atomic(&path, &artifact.bytes).map_err(|e| {
        ReportError::Export(format!("Failed to write {}: {}", path.display(), e))
    })?;
    Ok(path)
}

/// Service for exports that leave the store untouched
pub struct ExportService<'a, E: Exporter + ?Sized> {
    store: &'a RecordStore,
    exporter: &'a E,
}

impl<'a, E: Exporter + ?Sized> ExportService<'a, E> {
    /// Create a new export service
    pub fn new(store: &'a RecordStore, exporter: &'a E) -> Self {
        Self { store, exporter }
    }

    /// Export one category's records for `period`
    pub fn export_category(
        &self,
        category: Category,
        cdr: &str,
        period: &PeriodKey,
    ) -> ReportResult<ExportArtifact> {
        check_registry_code(cdr)?;
        let records = self.store.snapshot(category)?;
        let in_period = filter_by_period(&records, period);
        category_artifact(self.exporter, category, cdr, period, &in_period)
    }

    /// Export the consolidated workbook
    ///
    /// With `ConsolidatedScope::Period` each sheet holds only the records of
    /// `period`; with `FullHistory` every record in the store.
    pub fn export_consolidated(
        &self,
        scope: ConsolidatedScope,
        period: &PeriodKey,
    ) -> ReportResult<ExportArtifact> {
        let mut sections = CategoryRecords::new();
        for category in Category::ALL {
            let records = self.store.snapshot(category)?;
            let records = match scope {
                ConsolidatedScope::FullHistory => records,
                ConsolidatedScope::Period => filter_by_period(&records, period),
            };
            sections.insert(category, records);
        }
        consolidated_artifact(self.exporter, &sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::XlsxExporter;
    use tempfile::TempDir;

    fn record(pdr: &str) -> Record {
        Record::new().with("CDR", "AB1").with("PDR", pdr)
    }

    fn seeded_store() -> RecordStore {
        let store = RecordStore::new();
        store.append(Category::Header, record("20240201")).unwrap();
        store.append(Category::Client, record("20240131")).unwrap();
        store.append(Category::Client, record("20240210")).unwrap();
        store.append(Category::Client, record("20240228")).unwrap();
        store
    }

    #[test]
    fn test_export_category_filters_by_period() {
        let store = seeded_store();
        let exporter = XlsxExporter::new();
        let period = PeriodKey::parse("202402").unwrap();

        let artifact = ExportService::new(&store, &exporter)
            .export_category(Category::Client, "AB1", &period)
            .unwrap();

        assert_eq!(artifact.file_name, "DETALLECLIENTE_AB1_202402.xlsx");
        assert_eq!(artifact.rows, 2);
        assert_eq!(artifact.category, Some(Category::Client));
        // the store is not touched
        assert_eq!(store.len(Category::Client).unwrap(), 3);
    }

    #[test]
    fn test_export_category_rejects_unsafe_registry_code() {
        let store = seeded_store();
        let exporter = XlsxExporter::new();
        let period = PeriodKey::parse("202402").unwrap();

        let err = ExportService::new(&store, &exporter)
            .export_category(Category::Client, "../x", &period)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_consolidated_scope() {
        let store = seeded_store();
        let exporter = XlsxExporter::new();
        let period = PeriodKey::parse("202402").unwrap();
        let service = ExportService::new(&store, &exporter);

        let full = service
            .export_consolidated(ConsolidatedScope::FullHistory, &period)
            .unwrap();
        let scoped = service
            .export_consolidated(ConsolidatedScope::Period, &period)
            .unwrap();

        assert_eq!(full.file_name, "reporteria_general.xlsx");
        assert_eq!(full.rows, 4);
        assert_eq!(scoped.rows, 3);
        assert!(full.category.is_none());
    }

    #[test]
    fn test_write_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let artifact = ExportArtifact {
            category: None,
            file_name: "reporteria_general.xlsx".into(),
            rows: 0,
            bytes: b"bytes".to_vec(),
        };

        let path = write_artifact(&temp_dir.path().join("documentos"), &artifact).unwrap();
        assert_eq!(path, temp_dir.path().join("documentos").join("reporteria_general.xlsx"));
        assert_eq!(std::fs::read(path).unwrap(), b"bytes");
    }
}
