//! Informational CLI commands
//!
//! Commands that read configuration and history without opening a session.

use crate::audit::AuditLogger;
use crate::config::{ReportPaths, Settings};
use crate::display::{format_all_schemas, format_schema};
use crate::error::ReportResult;
use crate::models::Category;

/// Print the field schema of one category, or of all of them
pub fn handle_schema_command(category: Option<Category>) -> ReportResult<()> {
    match category {
        Some(category) => print!("{}", format_schema(category)),
        None => print!("{}", format_all_schemas()),
    }
    Ok(())
}

/// Print resolved paths and settings
pub fn handle_config_command(paths: &ReportPaths, settings: &Settings) -> ReportResult<()> {
    println!("Reporteria Configuration");
    println!("========================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Settings file:     {}", paths.settings_file().display());
    println!("Audit log:         {}", paths.audit_log().display());
    println!("Output directory:  {}", settings.output_dir(paths).display());
    println!();
    println!("Settings:");
    println!("  Consolidated scope: {}", settings.consolidated_scope);
    println!(
        "  Publishing:         {}",
        if settings.publish.enabled {
            format!("enabled ({})", settings.publish_dir(paths).display())
        } else {
            "disabled".to_string()
        }
    );
    println!(
        "  Default CDR:        {}",
        settings.default_cdr.as_deref().unwrap_or("(none)")
    );
    Ok(())
}

/// Print the most recent audit entries
pub fn handle_audit_command(paths: &ReportPaths, limit: usize) -> ReportResult<()> {
    let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
