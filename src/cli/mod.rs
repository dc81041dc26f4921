//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod info;
pub mod session;
pub mod shell;

use std::path::Path;

pub use info::{handle_audit_command, handle_config_command, handle_schema_command};
pub use session::{Outcome, Session, SessionCommand, SessionLine};
pub use shell::{parse_command_line, run_script, run_stdin, ShellSummary};

use crate::config::{ReportPaths, Settings};
use crate::error::ReportResult;

/// Parse a category argument for clap
pub fn parse_category(s: &str) -> Result<crate::models::Category, String> {
    session::parse_category_arg(s)
}

/// Run a capture session from a script, or from standard input
pub fn handle_session_command(
    paths: ReportPaths,
    settings: Settings,
    script: Option<&Path>,
) -> ReportResult<ShellSummary> {
    paths.ensure_directories()?;
    let mut session = Session::new(paths, settings);

    let summary = match script {
        Some(script) => run_script(&mut session, script)?,
        None => run_stdin(&mut session)?,
    };

    let remaining = session.store().counts()?.total();
    if remaining > 0 {
        tracing::warn!(remaining, "session ended with records that were never closed out");
    }
    Ok(summary)
}
