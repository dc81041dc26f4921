//! Service layer for reporteria
//!
//! The service layer provides the report workflow on top of the record
//! store: capturing records, filtering them by period, exporting workbooks
//! and closing periods.

pub mod capture;
pub mod closeout;
pub mod export;
pub mod period;

pub use capture::{parse_assignment, CaptureContext, CaptureService, Captured};
pub use closeout::{CloseoutReport, CloseoutState, PeriodCloseout, PublishWarning, Published};
pub use export::{write_artifact, ExportService};
pub use period::filter_by_period;
