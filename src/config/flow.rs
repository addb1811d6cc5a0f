//! Session flow configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::DEFAULT_ACCEPTED_TYPES;

/// Settings shared by every source in a session
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// File types offered on the file prompt when a source sets none
    #[serde(default = "default_accepted_types")]
    pub accepted_types: String,
}

impl FlowConfig {
    /// Validate flow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.accepted_types.trim().is_empty() {
            return Err(ValidationError::MissingRequired("flow.accepted_types"));
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            accepted_types: default_accepted_types(),
        }
    }
}

fn default_accepted_types() -> String {
    DEFAULT_ACCEPTED_TYPES.to_string()
}
