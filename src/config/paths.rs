//! Path management for reporteria
//!
//! ## Path Resolution Order
//!
//! 1. `REPORTERIA_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for the application
//!    (`~/.config/reporteria` on Linux, `%APPDATA%\reporteria` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ReportError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "REPORTERIA_DATA_DIR";

/// Manages all paths used by reporteria
#[derive(Debug, Clone)]
pub struct ReportPaths {
    base_dir: PathBuf,
}

impl ReportPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ReportError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Base directory for configuration and logs
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Default directory for exported workbooks
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("documentos")
    }

    /// Default target directory for the directory publisher
    pub fn publish_dir(&self) -> PathBuf {
        self.base_dir.join("publicados")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ReportError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, ReportError> {
    ProjectDirs::from("", "", "reporteria")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ReportError::Config("Could not determine a configuration directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(paths.output_dir(), temp_dir.path().join("documentos"));
        assert_eq!(paths.publish_dir(), temp_dir.path().join("publicados"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
