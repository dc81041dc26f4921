//! User settings for reporteria
//!
//! Manages where exports are written, which collections feed the consolidated
//! workbook, and whether exported files are published.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::paths::ReportPaths;
use crate::error::ReportError;
use crate::storage::{read_json, write_json_atomic};

/// Which records feed the consolidated workbook at closeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsolidatedScope {
    /// Every record in the store, regardless of period
    #[default]
    FullHistory,
    /// Only the records of the period being closed
    Period,
}

impl fmt::Display for ConsolidatedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullHistory => write!(f, "full history"),
            Self::Period => write!(f, "period"),
        }
    }
}

/// Publishing settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishSettings {
    /// Whether exported files are handed to the publisher
    #[serde(default)]
    pub enabled: bool,

    /// Target directory for the directory publisher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<PathBuf>,
}

/// User settings for reporteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Where exported workbooks are written (defaults to `documentos/`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Records used for the consolidated workbook
    #[serde(default)]
    pub consolidated_scope: ConsolidatedScope,

    /// Publishing of exported files
    #[serde(default)]
    pub publish: PublishSettings,

    /// Registry code preselected when a session starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cdr: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            output_dir: None,
            consolidated_scope: ConsolidatedScope::default(),
            publish: PublishSettings::default(),
            default_cdr: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        read_json(paths.settings_file()).map_err(|e| {
            ReportError::Config(format!("Failed to load settings: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Effective output directory
    pub fn output_dir(&self, paths: &ReportPaths) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| paths.output_dir())
    }

    /// Effective publish directory
    pub fn publish_dir(&self, paths: &ReportPaths) -> PathBuf {
        self.publish
            .target_dir
            .clone()
            .unwrap_or_else(|| paths.publish_dir())
    }
}
