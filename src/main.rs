use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use reporteria::cli::{
    handle_audit_command, handle_config_command, handle_schema_command, handle_session_command,
    parse_category,
};
use reporteria::config::{logging::init_tracing, ReportPaths, Settings};
use reporteria::models::Category;

#[derive(Parser)]
#[command(
    name = "reporteria",
    version,
    about = "Monthly regulatory report capture and closeout",
    long_about = "Reporteria captures the records of a monthly regulatory submission \
                  (header, clients, operations, transactions), exports them as xlsx \
                  workbooks and closes each period by exporting, publishing and \
                  clearing the captured records."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a capture session
    Session {
        /// Read commands from a file instead of standard input
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Show the fields of a category, or of all categories
    Schema {
        #[arg(value_parser = parse_category)]
        category: Option<Category>,
    },

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Session { script }) => {
            let summary = handle_session_command(paths, settings, script.as_deref())?;
            if summary.failures > 0 {
                bail!(
                    "{} of {} commands failed",
                    summary.failures,
                    summary.commands
                );
            }
        }
        Some(Commands::Schema { category }) => handle_schema_command(category)?,
        Some(Commands::Config) => handle_config_command(&paths, &settings)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&paths, limit)?,
        None => {
            println!("Reporteria - monthly regulatory report capture");
            println!();
            println!("Run 'reporteria --help' for usage information.");
            println!("Run 'reporteria session' to start capturing records.");
        }
    }

    Ok(())
}
