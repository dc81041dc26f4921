//! Period closeout
//!
//! Exports every category for the period being closed, hands the files to
//! the publisher, and empties the record store for the next period.
//!
//! The store is cleared only after every export has succeeded. Publishing
//! is best effort: its failures become warnings on the report.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ConsolidatedScope;
use crate::error::{ReportError, ReportResult};
use crate::export::{CategoryRecords, ExportArtifact, Exporter, XlsxExporter};
use crate::models::schema::check_registry_code;
use crate::models::{Category, PeriodKey};
use crate::publish::Publisher;
use crate::storage::{CategoryCounts, RecordStore};

use super::export::{category_artifact, consolidated_artifact, write_artifact};
use super::period::filter_by_period;

/// Orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseoutState {
    /// Accepting captures and closeouts
    Open,
    /// A closeout is running
    Closing,
}

/// A file that reached the publisher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub file_name: String,
    pub locator: String,
}

/// A file the publisher could not take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishWarning {
    pub file_name: String,
    pub message: String,
}

/// Outcome of a successful closeout
#[derive(Debug, Clone)]
pub struct CloseoutReport {
    pub period: PeriodKey,
    pub cdr: String,
    /// Records exported per category (period-filtered)
    pub exported: CategoryCounts,
    /// Which records fed the consolidated workbook
    pub consolidated_scope: ConsolidatedScope,
    /// Per-category workbooks in category order, then the consolidated one
    pub artifacts: Vec<ExportArtifact>,
    /// Paths written, when an output directory is configured
    pub written: Vec<PathBuf>,
    pub published: Vec<Published>,
    pub warnings: Vec<PublishWarning>,
}

impl CloseoutReport {
    /// The consolidated workbook
    pub fn consolidated(&self) -> Option<&ExportArtifact> {
        self.artifacts.iter().find(|a| a.category.is_none())
    }

    /// The workbook of one category
    pub fn artifact(&self, category: Category) -> Option<&ExportArtifact> {
        self.artifacts.iter().find(|a| a.category == Some(category))
    }
}

/// Resets the state flag when a closeout ends, however it ends
struct ClosingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ClosingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Coordinates the end-of-period export and reset
pub struct PeriodCloseout<E: Exporter = XlsxExporter> {
    exporter: E,
    publisher: Option<Box<dyn Publisher>>,
    scope: ConsolidatedScope,
    output_dir: Option<PathBuf>,
    closing: AtomicBool,
}

impl PeriodCloseout<XlsxExporter> {
    /// Closeout producing xlsx workbooks
    pub fn xlsx() -> Self {
        Self::new(XlsxExporter::new())
    }
}

impl<E: Exporter> PeriodCloseout<E> {
    /// Create a closeout around an exporter
    ///
    /// By default nothing is written to disk or published; the artifacts are
    /// only returned in the report.
    pub fn new(exporter: E) -> Self {
        Self {
            exporter,
            publisher: None,
            scope: ConsolidatedScope::default(),
            output_dir: None,
            closing: AtomicBool::new(false),
        }
    }

    /// Hand every exported file to `publisher`
    pub fn with_publisher(mut self, publisher: Box<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Choose which records feed the consolidated workbook
    pub fn with_scope(mut self, scope: ConsolidatedScope) -> Self {
        self.scope = scope;
        self
    }

    /// Write every exported file into `dir` before the store is cleared
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// The exporter in use
    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    /// Current state
    pub fn state(&self) -> CloseoutState {
        if self.closing.load(Ordering::Acquire) {
            CloseoutState::Closing
        } else {
            CloseoutState::Open
        }
    }

    fn begin(&self) -> ReportResult<ClosingGuard<'_>> {
        self.closing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ReportError::ReentrancyConflict)?;
        Ok(ClosingGuard {
            flag: &self.closing,
        })
    }

    /// Close `period` for registry code `cdr`
    ///
    /// Fails with `ReentrancyConflict` while another closeout is running, and
    /// with a validation error when `cdr` cannot be part of a file name.
    /// Any export or write failure aborts before the store is cleared.
    pub fn close_period(
        &self,
        store: &RecordStore,
        cdr: &str,
        period: &PeriodKey,
    ) -> ReportResult<CloseoutReport> {
        check_registry_code(cdr)?;
        let _guard = self.begin()?;
        tracing::info!(period = %period, cdr, "closing period");

        let mut exported = CategoryCounts::default();
        let mut artifacts = Vec::with_capacity(Category::ALL.len() + 1);
        let mut sections = CategoryRecords::new();

        for category in Category::ALL {
            let records = store.snapshot(category)?;
            let in_period = filter_by_period(&records, period);

            let artifact = category_artifact(&self.exporter, category, cdr, period, &in_period)
                .map_err(|e| {
                    tracing::warn!(category = %category, "export failed, store kept: {}", e);
                    e
                })?;
            exported.set(category, in_period.len());
            artifacts.push(artifact);

            let consolidated = match self.scope {
                ConsolidatedScope::FullHistory => records,
                ConsolidatedScope::Period => in_period,
            };
            sections.insert(category, consolidated);
        }

        artifacts.push(consolidated_artifact(&self.exporter, &sections).map_err(|e| {
            tracing::warn!("consolidated export failed, store kept: {}", e);
            e
        })?);

        let mut written = Vec::new();
        if let Some(dir) = &self.output_dir {
            for artifact in &artifacts {
                written.push(write_artifact(dir, artifact)?);
            }
        }

        let (published, warnings) = self.publish_all(&artifacts);

        store.clear_all()?;
        tracing::info!(
            period = %period,
            exported = exported.total(),
            warnings = warnings.len(),
            "period closed"
        );

        Ok(CloseoutReport {
            period: period.clone(),
            cdr: cdr.to_string(),
            exported,
            consolidated_scope: self.scope,
            artifacts,
            written,
            published,
            warnings,
        })
    }

    fn publish_all(&self, artifacts: &[ExportArtifact]) -> (Vec<Published>, Vec<PublishWarning>) {
        let mut published = Vec::new();
        let mut warnings = Vec::new();

        let Some(publisher) = &self.publisher else {
            return (published, warnings);
        };

        for artifact in artifacts {
            match publisher.publish(&artifact.bytes, &artifact.file_name) {
                Ok(locator) => published.push(Published {
                    file_name: artifact.file_name.clone(),
                    locator,
                }),
                Err(e) => {
                    tracing::warn!(file = %artifact.file_name, "publish failed: {}", e);
                    warnings.push(PublishWarning {
                        file_name: artifact.file_name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        (published, warnings)
    }
}
