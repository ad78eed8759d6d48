//! Configuration module for ecoscore
//!
//! This module handles:
//! - Project-level configuration (ecoscore.toml)
//! - Evaluation store location
//! - Report and CLI defaults

mod project_config;

pub use project_config::{
    default_store_path, load_project_config, CliDefaults, ProjectConfig, ReportConfig,
    StorageConfig, CONFIG_FILE_NAME,
};
