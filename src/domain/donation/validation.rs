//! Outcome of checking a submitted file against a source.

use serde::{Deserialize, Serialize};

/// Status code meaning "recognized export for this source".
pub const STATUS_RECOGNIZED: i32 = 0;

/// Result of validating one file submission.
///
/// Any status other than [`STATUS_RECOGNIZED`] means the file was not
/// recognized; the code encodes the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValidationResult {
    pub fn recognized() -> Self {
        Self {
            status_code: STATUS_RECOGNIZED,
            description: None,
        }
    }

    pub fn unrecognized(status_code: i32, description: impl Into<String>) -> Self {
        Self {
            status_code,
            description: Some(description.into()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.status_code == STATUS_RECOGNIZED
    }
}
