//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Source name must not be empty")]
    EmptySourceName,

    #[error("Duplicate source name: {0}")]
    DuplicateSource(String),

    #[error("Source '{0}' defines no tables")]
    NoTables(String),

    #[error("Source '{source_name}' has duplicate table id '{table}'")]
    DuplicateTable { source_name: String, table: String },

    #[error("Invalid JSON pointer '{0}': must be empty or start with '/'")]
    InvalidPointer(String),
}
