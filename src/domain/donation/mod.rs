//! Donation domain module.
//!
//! The guided donation session: a user supplies a platform export, sees
//! what would be shared and decides whether to donate it.
//!
//! # Components
//!
//! - `flow` - Resumable session flow controller (the core state machine)
//! - `builder` - Stateless page and command constructors
//! - `progress` - Progress arithmetic across sources
//! - `log` - Session-scoped tracking log
//! - `protocol` - Commands, replies and emissions exchanged with the host

mod builder;
mod errors;
mod flow;
mod log;
mod outcome;
mod page;
mod phase;
mod progress;
mod protocol;
mod table;
mod validation;

pub use builder::{
    checkbox_questionnaire, consent_form, donate, exit, prompt_file, render_donation_page,
    render_end_page, render_questionnaire_page, retry_confirmation, EXIT_SUCCESS,
    GROUP_QUESTION_ID,
};
pub use errors::FlowError;
pub use flow::{FlowState, QueuedCommand, SessionFlow, SUCCESS_MESSAGE};
pub use log::{LogEntry, LogLevel, SessionLog, EMPTY_LOG_LINE};
pub use outcome::{QuestionnaireOutcome, SourceOutcome, SourceReport};
pub use page::{Header, Page, PageBody, PageKind, Question};
pub use phase::FlowPhase;
pub use progress::{progress, ProgressTracker, STEPS_PER_SOURCE};
pub use protocol::{Emission, InboundResult, OutboundCommand, SubmittedFile};
pub use table::Table;
pub use validation::{ValidationResult, STATUS_RECOGNIZED};
