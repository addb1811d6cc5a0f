//! Session flow errors.

use thiserror::Error;

use super::phase::FlowPhase;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::SourceError;

/// Errors returned by the session flow.
///
/// None of these are retryable: protocol violations are caller bugs and
/// collaborator faults end the session.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Session has not been started")]
    NotStarted,

    #[error("Session was already started")]
    AlreadyStarted,

    #[error("Session has finished")]
    SessionFinished,

    #[error("Session faulted and cannot be resumed")]
    Faulted,

    #[error("Stale resume: expected token {expected}, got {got}")]
    StaleResume { expected: u64, got: u64 },

    #[error("Reply required while in phase {phase}")]
    MissingReply { phase: FlowPhase },

    #[error("Command {seq} does not accept a reply")]
    UnexpectedReply { seq: u64 },

    #[error("Source '{source_name}' failed: {error}")]
    Source {
        source_name: String,
        #[source]
        error: SourceError,
    },

    #[error("Source '{source_name}' returned malformed tables: {reason}")]
    MalformedExtraction { source_name: String, reason: String },

    #[error("Invalid state transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    #[error("Tracking log serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No command queued in phase {phase}")]
    NothingQueued { phase: FlowPhase },

    #[error("Cannot handle a reply in phase {phase}")]
    UnexpectedPhase { phase: FlowPhase },

    #[error("Saved state covers {expected} sources, got {got}")]
    IncompatibleState { expected: usize, got: usize },
}

impl FlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::NotStarted => ErrorCode::SessionNotStarted,
            FlowError::AlreadyStarted => ErrorCode::SessionAlreadyStarted,
            FlowError::SessionFinished | FlowError::Faulted => ErrorCode::SessionFinished,
            FlowError::StaleResume { .. } => ErrorCode::StaleResume,
            FlowError::MissingReply { .. } => ErrorCode::MissingReply,
            FlowError::UnexpectedReply { .. } => ErrorCode::UnexpectedReply,
            FlowError::Source { .. } => ErrorCode::SourceFault,
            FlowError::MalformedExtraction { .. } => ErrorCode::MalformedExtraction,
            FlowError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            FlowError::IncompatibleState { .. } => ErrorCode::ValidationFailed,
            FlowError::Serialization(_)
            | FlowError::NothingQueued { .. }
            | FlowError::UnexpectedPhase { .. } => ErrorCode::InternalError,
        }
    }

    /// Returns true for caller contract violations, as opposed to faults.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            FlowError::NotStarted
                | FlowError::AlreadyStarted
                | FlowError::SessionFinished
                | FlowError::Faulted
                | FlowError::StaleResume { .. }
                | FlowError::MissingReply { .. }
                | FlowError::UnexpectedReply { .. }
        )
    }
}

impl From<&FlowError> for DomainError {
    fn from(err: &FlowError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            FlowError::Source { source_name, .. }
            | FlowError::MalformedExtraction { source_name, .. } => {
                domain.with_detail("source", source_name.as_str())
            }
            FlowError::MissingReply { phase } | FlowError::UnexpectedPhase { phase } => {
                domain.with_detail("phase", phase.label())
            }
            _ => domain,
        }
    }
}
