//! Session flow controller.
//!
//! Drives one donation session as an explicit, resumable state machine.
//! For each configured source, in order:
//!
//! 1. Prompt for a file. A skip ends the source.
//! 2. Validate it. An unrecognized file asks whether to try again.
//! 3. Extract tables (a placeholder if none) and show the consent form.
//! 4. On consent, donate the payload and, if the source has groups, show the
//!    checkbox questionnaire.
//!
//! Every command is handed out as an [`Emission`] with a sequence token. The
//! host performs it and calls [`SessionFlow::resume`] with the same token,
//! plus the user's reply when `awaits_reply` is set. All state, the tracking
//! log included, lives in [`FlowState`]; a saved state can be resumed with
//! [`SessionFlow::from_state`].

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::builder::{self, EXIT_SUCCESS};
use super::errors::FlowError;
use super::log::{LogLevel, SessionLog};
use super::outcome::{QuestionnaireOutcome, SourceOutcome, SourceReport};
use super::phase::FlowPhase;
use super::progress::ProgressTracker;
use super::protocol::{Emission, InboundResult, OutboundCommand};
use super::table::Table;
use crate::domain::foundation::{Progress, SessionId, StateMachine};
use crate::ports::{DonationSource, SourceError};

/// Message sent with the successful exit command.
pub const SUCCESS_MESSAGE: &str = "Success";

/// A command waiting to be emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedCommand {
    pub command: OutboundCommand,
    pub diagnostic: bool,
}

/// Complete, inspectable state of a session flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    pub source_index: usize,
    pub phase: FlowPhase,
    pub progress: ProgressTracker,
    /// Tables on the consent form currently awaiting a decision.
    pub pending_tables: Vec<Table>,
    /// Groups for the questionnaire of the current source.
    pub pending_groups: Vec<String>,
    /// Commands produced by the last transition but not yet emitted.
    pub queue: VecDeque<QueuedCommand>,
    /// Token of the last emitted command.
    pub seq: u64,
    /// Whether the last emitted command expects a reply.
    pub awaiting_reply: bool,
    /// Files submitted for the current source.
    pub attempts: u32,
    pub reports: Vec<SourceReport>,
    pub log: SessionLog,
}

impl FlowState {
    fn new(sources_total: usize) -> Self {
        Self {
            source_index: 0,
            phase: FlowPhase::Idle,
            progress: ProgressTracker::new(sources_total),
            pending_tables: Vec::new(),
            pending_groups: Vec::new(),
            queue: VecDeque::new(),
            seq: 0,
            awaiting_reply: false,
            attempts: 0,
            reports: Vec::new(),
            log: SessionLog::new(),
        }
    }
}

/// Resumable controller for one donation session.
pub struct SessionFlow {
    session_id: SessionId,
    sources: Vec<Arc<dyn DonationSource>>,
    state: FlowState,
}

impl SessionFlow {
    pub fn new(session_id: SessionId, sources: Vec<Arc<dyn DonationSource>>) -> Self {
        let state = FlowState::new(sources.len());
        Self {
            session_id,
            sources,
            state,
        }
    }

    /// Rebuilds a flow from state taken with [`SessionFlow::state`].
    ///
    /// `sources` must be the same sources, in the same order, the state was
    /// produced with. The host then resumes with the saved `seq`.
    pub fn from_state(
        session_id: SessionId,
        sources: Vec<Arc<dyn DonationSource>>,
        state: FlowState,
    ) -> Result<Self, FlowError> {
        let expected = state.progress.sources_total();
        if expected != sources.len() {
            return Err(FlowError::IncompatibleState {
                expected,
                got: sources.len(),
            });
        }
        Ok(Self {
            session_id,
            sources,
            state,
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn phase(&self) -> FlowPhase {
        self.state.phase
    }

    pub fn progress(&self) -> Progress {
        self.state.progress.current()
    }

    pub fn log(&self) -> &SessionLog {
        &self.state.log
    }

    /// Outcomes of the sources handled so far, in source order.
    pub fn reports(&self) -> &[SourceReport] {
        &self.state.reports
    }

    /// Returns true once the exit command has been queued.
    pub fn is_finished(&self) -> bool {
        matches!(self.state.phase, FlowPhase::Finished | FlowPhase::Closed)
    }

    /// Starts the session and returns its first command.
    pub fn start(&mut self) -> Result<Emission, FlowError> {
        if self.state.phase != FlowPhase::Idle {
            return Err(FlowError::AlreadyStarted);
        }
        tracing::info!(
            session_id = %self.session_id,
            sources = self.sources.len(),
            "Starting the donation flow"
        );
        self.state.log.record(LogLevel::Info, "Starting the donation flow");
        self.advance_to(0)?;
        self.next_emission()
    }

    /// Resumes after the host performed the command with token `seq`.
    ///
    /// `reply` must be `Some` exactly when that command awaited a reply.
    /// Returns `Ok(None)` once the end page has been acknowledged.
    pub fn resume(
        &mut self,
        seq: u64,
        reply: Option<InboundResult>,
    ) -> Result<Option<Emission>, FlowError> {
        match self.state.phase {
            FlowPhase::Idle => return Err(FlowError::NotStarted),
            FlowPhase::Closed => return Err(FlowError::SessionFinished),
            FlowPhase::Faulted => return Err(FlowError::Faulted),
            _ => {}
        }
        if seq != self.state.seq {
            return Err(FlowError::StaleResume {
                expected: self.state.seq,
                got: seq,
            });
        }

        match (self.state.awaiting_reply, reply) {
            (true, Some(reply)) => {
                // The awaited command is always the last of its batch.
                if let Err(err) = self.handle_reply(reply) {
                    return Err(self.fault(err));
                }
                self.next_emission().map(Some)
            }
            (true, None) => Err(FlowError::MissingReply {
                phase: self.state.phase,
            }),
            (false, Some(_)) => Err(FlowError::UnexpectedReply { seq }),
            (false, None) if self.state.queue.is_empty() => {
                self.transition(FlowPhase::Closed)?;
                tracing::debug!(session_id = %self.session_id, "Session closed");
                Ok(None)
            }
            (false, None) => self.next_emission().map(Some),
        }
    }

    fn handle_reply(&mut self, reply: InboundResult) -> Result<(), FlowError> {
        tracing::debug!(
            session_id = %self.session_id,
            phase = %self.state.phase,
            reply = reply.type_name(),
            "Handling reply"
        );
        match self.state.phase {
            FlowPhase::AwaitFile => self.on_file(reply),
            FlowPhase::AwaitRetryDecision => self.on_retry_decision(reply),
            FlowPhase::AwaitConsent => self.on_consent(reply),
            FlowPhase::AwaitQuestionnaire => self.on_questionnaire(reply),
            phase => Err(FlowError::UnexpectedPhase { phase }),
        }
    }

    fn on_file(&mut self, reply: InboundResult) -> Result<(), FlowError> {
        let source = self.current_source()?;
        let name = source.name().to_string();

        let Some(file) = reply.into_file() else {
            self.note(LogLevel::Info, format!("Skipped {}", name));
            self.push_tracking()?;
            return self.finish_source(SourceOutcome::SkippedBeforeExtraction);
        };
        self.state.attempts += 1;

        let validation = source
            .validate(&file)
            .map_err(|error| source_fault(&name, error))?;
        if !validation.is_recognized() {
            self.note(
                LogLevel::Info,
                format!(
                    "Not a valid {} file (status code {}); prompt retry confirmation",
                    name, validation.status_code
                ),
            );
            self.push_tracking()?;
            self.push(builder::render_donation_page(
                &name,
                builder::retry_confirmation(&name),
                self.progress(),
            ));
            return self.transition(FlowPhase::AwaitRetryDecision);
        }

        self.note(LogLevel::Info, format!("Payload for {}", name));
        self.state.progress.complete_step();

        let mut tables = source
            .extract(&file, &validation)
            .map_err(|error| source_fault(&name, error))?;
        ensure_unique_ids(&name, &tables)?;
        let groups = source
            .group_list(&file)
            .map_err(|error| source_fault(&name, error))?;
        if tables.is_empty() {
            self.note(LogLevel::Debug, format!("Nothing extracted for {}", name));
            tables.push(Table::placeholder(&name));
        }

        self.note(LogLevel::Info, format!("Prompt consent; {}", name));
        self.push_tracking()?;
        self.push(builder::render_donation_page(
            &name,
            builder::consent_form(tables.clone()),
            self.progress(),
        ));
        self.state.pending_tables = tables;
        self.state.pending_groups = groups;
        self.transition(FlowPhase::AwaitConsent)
    }

    fn on_retry_decision(&mut self, reply: InboundResult) -> Result<(), FlowError> {
        let name = self.current_source()?.name().to_string();
        if reply.is_affirmative() {
            self.note(LogLevel::Info, format!("Retry requested for {}", name));
            self.push_tracking()?;
            self.advance_to(self.state.source_index)
        } else {
            self.note(LogLevel::Info, format!("Skipped during retry {}", name));
            self.push_tracking()?;
            self.finish_source(SourceOutcome::SkippedBeforeExtraction)
        }
    }

    fn on_consent(&mut self, reply: InboundResult) -> Result<(), FlowError> {
        let name = self.current_source()?.name().to_string();
        self.state.progress.complete_step();
        self.state.pending_tables.clear();

        let Some(payload) = reply.into_json() else {
            self.note(
                LogLevel::Info,
                format!("Skipped after reviewing consent: {}", name),
            );
            self.push_tracking()?;
            return self.finish_source(SourceOutcome::SkippedAfterReview);
        };

        self.note(LogLevel::Info, format!("Data donated; {}", name));
        self.push_tracking()?;
        self.push(builder::donate(name.as_str(), payload));

        if self.state.pending_groups.is_empty() {
            return self.finish_source(SourceOutcome::Donated {
                questionnaire: QuestionnaireOutcome::NotOffered,
            });
        }
        self.note(LogLevel::Info, format!("Prompt questionnaire; {}", name));
        self.push(builder::render_questionnaire_page(
            &name,
            &self.state.pending_groups,
            self.progress(),
        ));
        self.transition(FlowPhase::AwaitQuestionnaire)
    }

    fn on_questionnaire(&mut self, reply: InboundResult) -> Result<(), FlowError> {
        let name = self.current_source()?.name().to_string();
        let outcome = match reply.into_json() {
            Some(payload) => {
                self.note(LogLevel::Info, format!("Questionnaire donated; {}", name));
                self.push_tracking()?;
                self.push(builder::donate(self.session_id.questionnaire_key(), payload));
                QuestionnaireOutcome::Answered
            }
            None => {
                self.note(LogLevel::Info, format!("Skipped questionnaire: {}", name));
                self.push_tracking()?;
                QuestionnaireOutcome::Skipped
            }
        };
        self.finish_source(SourceOutcome::Donated {
            questionnaire: outcome,
        })
    }

    /// Records the current source's outcome and moves to the next source.
    fn finish_source(&mut self, outcome: SourceOutcome) -> Result<(), FlowError> {
        let index = self.state.source_index;
        let name = self.current_source()?.name().to_string();
        tracing::info!(
            session_id = %self.session_id,
            source = %name,
            outcome = ?outcome,
            attempts = self.state.attempts,
            "Source finished"
        );
        self.state.reports.push(SourceReport {
            source: name,
            outcome,
            attempts: self.state.attempts,
        });
        self.state.progress.complete_source(index);
        self.state.pending_tables.clear();
        self.state.pending_groups.clear();
        self.state.attempts = 0;
        self.state.source_index = index + 1;
        self.advance_to(index + 1)
    }

    /// Prompts for the source at `index`, or ends the session past the last one.
    fn advance_to(&mut self, index: usize) -> Result<(), FlowError> {
        let Some(source) = self.sources.get(index).cloned() else {
            return self.finish_session();
        };
        let name = source.name();
        self.note(LogLevel::Info, format!("Prompt for file for {}", name));
        self.push(builder::render_donation_page(
            name,
            builder::prompt_file(source.accepted_types(), name),
            self.progress(),
        ));
        self.transition(FlowPhase::AwaitFile)
    }

    fn finish_session(&mut self) -> Result<(), FlowError> {
        if self.state.log.has_unflushed() {
            self.push_tracking()?;
        }
        tracing::info!(
            session_id = %self.session_id,
            donated = self.state.reports.iter().filter(|r| r.outcome.is_donated()).count(),
            "Donation flow finished"
        );
        self.push(builder::exit(EXIT_SUCCESS, SUCCESS_MESSAGE));
        self.push(builder::render_end_page(self.progress()));
        self.transition(FlowPhase::Finished)
    }

    fn current_source(&self) -> Result<Arc<dyn DonationSource>, FlowError> {
        self.sources
            .get(self.state.source_index)
            .cloned()
            .ok_or(FlowError::UnexpectedPhase {
                phase: self.state.phase,
            })
    }

    fn note(&mut self, level: LogLevel, message: String) {
        let source = self
            .sources
            .get(self.state.source_index)
            .map(|s| s.name())
            .unwrap_or("-");
        match level {
            LogLevel::Debug => {
                tracing::debug!(session_id = %self.session_id, source, "{}", message)
            }
            LogLevel::Info => {
                tracing::info!(session_id = %self.session_id, source, "{}", message)
            }
            LogLevel::Warn => {
                tracing::warn!(session_id = %self.session_id, source, "{}", message)
            }
        }
        self.state.log.record(level, message);
    }

    fn push(&mut self, command: OutboundCommand) {
        self.state.queue.push_back(QueuedCommand {
            command,
            diagnostic: false,
        });
    }

    /// Queues a donation of the full tracking log.
    fn push_tracking(&mut self) -> Result<(), FlowError> {
        let payload = self.state.log.flush()?;
        self.state.queue.push_back(QueuedCommand {
            command: builder::donate(self.session_id.tracking_key(), payload),
            diagnostic: true,
        });
        Ok(())
    }

    fn next_emission(&mut self) -> Result<Emission, FlowError> {
        let queued = self
            .state
            .queue
            .pop_front()
            .ok_or(FlowError::NothingQueued {
                phase: self.state.phase,
            })?;
        self.state.seq += 1;
        self.state.awaiting_reply = queued.command.awaits_reply();
        Ok(Emission {
            seq: self.state.seq,
            awaits_reply: self.state.awaiting_reply,
            diagnostic: queued.diagnostic,
            command: queued.command,
        })
    }

    fn transition(&mut self, next: FlowPhase) -> Result<(), FlowError> {
        self.state.phase = self.state.phase.transition_to(next)?;
        Ok(())
    }

    /// Ends the session after a fault; nothing more is emitted.
    fn fault(&mut self, err: FlowError) -> FlowError {
        tracing::error!(
            session_id = %self.session_id,
            phase = %self.state.phase,
            error = %err,
            "Donation flow faulted"
        );
        self.state.phase = FlowPhase::Faulted;
        self.state.queue.clear();
        self.state.awaiting_reply = false;
        err
    }
}

fn source_fault(name: &str, error: SourceError) -> FlowError {
    FlowError::Source {
        source_name: name.to_string(),
        error,
    }
}

fn ensure_unique_ids(name: &str, tables: &[Table]) -> Result<(), FlowError> {
    let mut seen = HashSet::new();
    for table in tables {
        if !seen.insert(table.id()) {
            return Err(FlowError::MalformedExtraction {
                source_name: name.to_string(),
                reason: format!("duplicate table id '{}'", table.id()),
            });
        }
    }
    Ok(())
}
