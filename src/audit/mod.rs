//! Audit logging for reporteria
//!
//! Records captures, exports, publications, clears and closeouts in an
//! append-only audit log. Since the record store itself lives only in
//! memory, the audit log is the lasting trace of what a session did.
//!
//! # Example
//!
//! ```rust,ignore
//! use reporteria::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.record(&AuditEntry::append(Category::Header, &record, count));
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
