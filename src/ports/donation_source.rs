//! Donation Source Port - validator/extractor capability for one platform.
//!
//! Each configured data origin (a platform export format) implements this
//! trait. The session flow only sees the trait, so adding a platform means
//! adding an implementation, not changing the flow.

use thiserror::Error;

use crate::domain::donation::{SubmittedFile, Table, ValidationResult};
use crate::domain::foundation::ValidationError;

/// MIME-like hints shown on the file prompt unless a source overrides them.
pub const DEFAULT_ACCEPTED_TYPES: &str = "application/zip, text/plain, application/json";

/// Port for validating and extracting a platform export.
///
/// # Contract
///
/// Implementations must:
/// - Be pure: no shared state between calls
/// - Report an unrecognized file through [`ValidationResult`], never as an error
/// - Return `Err` only for faults (unreadable input, broken invariants), which
///   end the session
///
/// # Usage
///
/// ```rust,ignore
/// let validation = source.validate(&file)?;
/// if validation.is_recognized() {
///     let tables = source.extract(&file, &validation)?;
///     let groups = source.group_list(&file)?;
/// }
/// ```
pub trait DonationSource: Send + Sync {
    /// Platform name, also used as the donation key for the main payload.
    fn name(&self) -> &str;

    /// Accepted file types shown on the file prompt.
    fn accepted_types(&self) -> &str {
        DEFAULT_ACCEPTED_TYPES
    }

    /// Decides whether `file` is a recognizable export for this source.
    fn validate(&self, file: &SubmittedFile) -> Result<ValidationResult, SourceError>;

    /// Extracts zero or more tables from a recognized file.
    fn extract(
        &self,
        file: &SubmittedFile,
        validation: &ValidationResult,
    ) -> Result<Vec<Table>, SourceError>;

    /// Group names for the follow-up questionnaire.
    ///
    /// Most sources have none.
    fn group_list(&self, _file: &SubmittedFile) -> Result<Vec<String>, SourceError> {
        Ok(Vec::new())
    }
}

/// Faults raised by a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Unreadable export: {0}")]
    Unreadable(String),

    #[error("Extraction of '{table}' failed: {reason}")]
    Extraction { table: String, reason: String },

    #[error("Invalid table: {0}")]
    InvalidTable(#[from] ValidationError),
}

impl SourceError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        SourceError::Unreadable(reason.into())
    }

    pub fn extraction(table: impl Into<String>, reason: impl Into<String>) -> Self {
        SourceError::Extraction {
            table: table.into(),
            reason: reason.into(),
        }
    }
}
