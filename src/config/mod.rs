//! Application configuration module
//!
//! This module provides type-safe configuration loading from an optional
//! configuration file and environment variables using the `config` and
//! `dotenvy` crates. Environment variables use the `DATA_DONATION` prefix and
//! nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use data_donation::config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("{} sources configured", config.sources.len());
//! ```

mod error;
mod flow;
mod logging;
mod sources;

pub use error::{ConfigError, ValidationError};
pub use flow::FlowConfig;
pub use logging::LoggingConfig;
pub use sources::{validate_sources, JsonSourceConfig, JsonTableConfig};

use serde::Deserialize;
use std::path::Path;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Settings shared by every source
    #[serde(default)]
    pub flow: FlowConfig,

    /// Configured data sources, in prompt order
    #[serde(default)]
    pub sources: Vec<JsonSourceConfig>,
}

impl AppConfig {
    /// Load configuration from an optional file and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `path` if given, in any format the `config` crate detects
    ///    from the extension
    /// 3. Overlays environment variables with `DATA_DONATION` prefix, using
    ///    `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `DATA_DONATION__LOGGING__LEVEL=debug` -> `logging.level = debug`
    /// - `DATA_DONATION__FLOW__ACCEPTED_TYPES=application/zip` -> `flow.accepted_types`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or values cannot be
    /// parsed into expected types.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let config = builder
            .add_source(
                config::Environment::with_prefix("DATA_DONATION")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.flow.validate()?;
        validate_sources(&self.sources)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("DATA_DONATION__LOGGING__LEVEL");
        env::remove_var("DATA_DONATION__LOGGING__JSON");
        env::remove_var("DATA_DONATION__FLOW__ACCEPTED_TYPES");
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[logging]
level = "warn"

[[sources]]
name = "Facebook"
required_keys = ["/comments"]
groups_pointer = "/groups"

[[sources.tables]]
id = "facebook_comments"
title_en = "Facebook comments"
title_nl = "Facebook reacties"
pointer = "/comments"
"#;

    #[test]
    fn test_defaults_without_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load(None).unwrap();

        assert!(config.sources.is_empty());
        assert_eq!(config.flow.accepted_types, FlowConfig::default().accepted_types);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config(SAMPLE);
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].name, "Facebook");
        assert_eq!(config.sources[0].tables[0].pointer, "/comments");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config(SAMPLE);
        env::set_var("DATA_DONATION__LOGGING__LEVEL", "debug");
        env::set_var("DATA_DONATION__FLOW__ACCEPTED_TYPES", "application/json");
        let result = AppConfig::load(Some(file.path()));
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.flow.accepted_types, "application/json");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load(Some(Path::new("/nonexistent/data-donation.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_sources() {
        let mut config = AppConfig::default();
        let source = JsonSourceConfig {
            name: "Facebook".to_string(),
            accepted_types: None,
            required_keys: Vec::new(),
            tables: vec![JsonTableConfig {
                id: "t".to_string(),
                title_en: "T".to_string(),
                title_nl: None,
                pointer: "/t".to_string(),
            }],
            groups_pointer: None,
            archive_member: None,
        };
        config.sources = vec![source.clone(), source];
        assert_eq!(
            config.validate(),
            Err(ValidationError::DuplicateSource("Facebook".to_string()))
        );
    }
}
