//! Capture session commands
//!
//! A session owns the record store for its lifetime. Each input line is one
//! command; commands return the text to show instead of printing it, so the
//! shell decides where output goes.

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{ReportPaths, Settings};
use crate::display::{
    format_all_schemas, format_closeout_report, format_record_list, format_schema, format_status,
};
use crate::error::{ReportError, ReportResult};
use crate::export::{ExportArtifact, XlsxExporter};
use crate::models::{parse_report_date, Category, PeriodKey};
use crate::publish::DirectoryPublisher;
use crate::services::{
    parse_assignment, write_artifact, CaptureContext, CaptureService, ExportService,
    PeriodCloseout,
};
use crate::storage::RecordStore;

/// A single session command line
#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true, disable_help_subcommand = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session commands
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Set the registry code and report date for new records
    Use {
        /// Registry code (up to 5 characters)
        cdr: String,
        /// Report date (YYYY-MM-DD or YYYYMMDD), today if omitted
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Capture a record
    Add {
        /// Category (header, client, operation, transaction)
        #[arg(value_parser = parse_category_arg)]
        category: Category,
        /// Field values
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// List the records of a category
    #[command(alias = "ls")]
    List {
        #[arg(value_parser = parse_category_arg)]
        category: Category,
    },
    /// Show record counts
    Status,
    /// Export one category's records for a period
    Export {
        #[arg(value_parser = parse_category_arg)]
        category: Category,
        /// Period (YYYYMM), the report date's month if omitted
        #[arg(short, long, value_parser = parse_period_arg)]
        period: Option<PeriodKey>,
    },
    /// Export the consolidated workbook
    Report {
        /// Period (YYYYMM), the report date's month if omitted
        #[arg(short, long, value_parser = parse_period_arg)]
        period: Option<PeriodKey>,
    },
    /// Export every category, publish, and clear the records
    Close {
        /// Period (YYYYMM), the report date's month if omitted
        #[arg(short, long, value_parser = parse_period_arg)]
        period: Option<PeriodKey>,
    },
    /// Discard records of one category, or of all categories
    Clear {
        #[arg(value_parser = parse_category_arg)]
        category: Option<Category>,
    },
    /// Show the fields of a category
    Schema {
        #[arg(value_parser = parse_category_arg)]
        category: Option<Category>,
    },
    /// Show available commands
    Help,
    /// Leave the session
    #[command(alias = "quit")]
    Exit,
}

pub(crate) fn parse_category_arg(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected header, client, operation or transaction)",
            s
        )
    })
}

fn parse_period_arg(s: &str) -> Result<PeriodKey, String> {
    PeriodKey::parse(s).map_err(|e| e.to_string())
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_report_date(s).map_err(|e| e.to_string())
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Show the text and keep reading
    Output(String),
    /// End the session
    Exit,
}

/// State of a capture session
pub struct Session {
    paths: ReportPaths,
    settings: Settings,
    store: RecordStore,
    audit: AuditLogger,
    exporter: XlsxExporter,
    closeout: PeriodCloseout,
    context: Option<CaptureContext>,
}

impl Session {
    /// Start a session with an empty store
    ///
    /// The configured default registry code, if any, is used with today's
    /// date as the initial context.
    pub fn new(paths: ReportPaths, settings: Settings) -> Self {
        let mut closeout = PeriodCloseout::xlsx()
            .with_scope(settings.consolidated_scope)
            .with_output_dir(settings.output_dir(&paths));
        if settings.publish.enabled {
            closeout = closeout.with_publisher(Box::new(DirectoryPublisher::new(
                settings.publish_dir(&paths),
            )));
        }

        let context = settings
            .default_cdr
            .as_deref()
            .and_then(|cdr| CaptureContext::new(cdr, Local::now().date_naive()).ok());

        Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            settings,
            store: RecordStore::new(),
            exporter: XlsxExporter::new(),
            closeout,
            context,
        }
    }

    /// The session's record store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Current capture context
    pub fn context(&self) -> Option<&CaptureContext> {
        self.context.as_ref()
    }

    /// Run one tokenized command line
    pub fn execute(&mut self, tokens: &[String]) -> ReportResult<Outcome> {
        let line = match SessionLine::try_parse_from(tokens) {
            Ok(line) => line,
            Err(e) => {
                use clap::error::ErrorKind;
                return match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                        Ok(Outcome::Output(e.render().to_string()))
                    }
                    _ => Err(ReportError::Validation(e.render().to_string())),
                };
            }
        };

        self.dispatch(line.command)
    }

    /// Run a parsed command
    pub fn dispatch(&mut self, command: SessionCommand) -> ReportResult<Outcome> {
        let output = match command {
            SessionCommand::Use { cdr, date } => self.use_context(&cdr, date)?,
            SessionCommand::Add { category, fields } => self.add(category, &fields)?,
            SessionCommand::List { category } => {
                format_record_list(category, &self.store.snapshot(category)?)
            }
            SessionCommand::Status => {
                let report_date = self
                    .context
                    .as_ref()
                    .map(|c| c.report_date().format("%Y-%m-%d").to_string());
                format_status(
                    self.context.as_ref().map(CaptureContext::cdr),
                    report_date.as_deref(),
                    &self.store.counts()?,
                )
            }
            SessionCommand::Export { category, period } => self.export(category, period)?,
            SessionCommand::Report { period } => self.report(period)?,
            SessionCommand::Close { period } => self.close(period)?,
            SessionCommand::Clear { category } => self.clear(category)?,
            SessionCommand::Schema { category } => match category {
                Some(category) => format_schema(category),
                None => format_all_schemas(),
            },
            SessionCommand::Help => SessionLine::command().render_help().to_string(),
            SessionCommand::Exit => return Ok(Outcome::Exit),
        };

        Ok(Outcome::Output(output))
    }

    fn require_context(&self) -> ReportResult<&CaptureContext> {
        self.context.as_ref().ok_or_else(|| {
            ReportError::Validation("No registry code set. Run `use <CDR>` first".into())
        })
    }

    /// Period given on the command line, else the report date's month
    fn resolve_period(&self, period: Option<PeriodKey>) -> ReportResult<PeriodKey> {
        match period {
            Some(period) => Ok(period),
            None => Ok(self.require_context()?.period()),
        }
    }

    fn use_context(&mut self, cdr: &str, date: Option<NaiveDate>) -> ReportResult<String> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let context = CaptureContext::new(cdr, date)?;

        let output = format!(
            "Registry code {}, report date {} (period {})",
            context.cdr(),
            context.report_date().format("%Y-%m-%d"),
            context.period()
        );
        self.context = Some(context);
        Ok(output)
    }

    fn add(&self, category: Category, fields: &[String]) -> ReportResult<String> {
        let context = self.require_context()?;
        let inputs = fields
            .iter()
            .map(|f| parse_assignment(f))
            .collect::<ReportResult<Vec<_>>>()?;

        let captured = CaptureService::new(&self.store)
            .with_audit(&self.audit)
            .capture(category, context, &inputs)?;

        Ok(format!(
            "{} saved. Records in memory: {}",
            category.label(),
            captured.count
        ))
    }

    fn write(&self, artifact: &ExportArtifact, period: &PeriodKey) -> ReportResult<String> {
        let path = write_artifact(&self.settings.output_dir(&self.paths), artifact)?;
        self.audit.record(&AuditEntry::export(
            artifact.category,
            Some(period),
            &artifact.file_name,
            artifact.rows,
        ));
        Ok(format!("Exported {} rows to {}", artifact.rows, path.display()))
    }

    fn export(&self, category: Category, period: Option<PeriodKey>) -> ReportResult<String> {
        let cdr = self.require_context()?.cdr().to_string();
        let period = self.resolve_period(period)?;

        let artifact = ExportService::new(&self.store, &self.exporter)
            .export_category(category, &cdr, &period)?;
        self.write(&artifact, &period)
    }

    fn report(&self, period: Option<PeriodKey>) -> ReportResult<String> {
        let period = self.resolve_period(period)?;

        let artifact = ExportService::new(&self.store, &self.exporter)
            .export_consolidated(self.settings.consolidated_scope, &period)?;
        self.write(&artifact, &period)
    }

    fn close(&self, period: Option<PeriodKey>) -> ReportResult<String> {
        let cdr = self.require_context()?.cdr().to_string();
        let period = self.resolve_period(period)?;

        let report = self.closeout.close_period(&self.store, &cdr, &period)?;

        for artifact in &report.artifacts {
            self.audit.record(&AuditEntry::export(
                artifact.category,
                Some(&period),
                &artifact.file_name,
                artifact.rows,
            ));
        }
        for published in &report.published {
            self.audit
                .record(&AuditEntry::publish(&published.file_name, &published.locator));
        }
        self.audit
            .record(&AuditEntry::closeout(&period, &report.exported));

        Ok(format_closeout_report(&report))
    }

    fn clear(&self, category: Option<Category>) -> ReportResult<String> {
        let discarded = match category {
            Some(category) => {
                let count = self.store.len(category)?;
                self.store.clear(category)?;
                count
            }
            None => {
                let count = self.store.counts()?.total();
                self.store.clear_all()?;
                count
            }
        };

        self.audit.record(&AuditEntry::clear(category, discarded));
        let target = category.map_or("all categories".to_string(), |c| c.label().to_string());
        Ok(format!("Cleared {}: {} records discarded", target, discarded))
    }
}
