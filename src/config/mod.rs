//! Configuration module for reporteria
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Diagnostic logging setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::{ConsolidatedScope, PublishSettings, Settings};
