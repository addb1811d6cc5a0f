//! RunSessionHandler - Drives one donation session against a host.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::donation::{FlowError, OutboundCommand, SessionFlow, SourceReport};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::ports::{DonationHost, DonationSource, HostError};

/// Command to run a session over the given sources.
#[derive(Clone)]
pub struct RunSessionCommand {
    pub session_id: SessionId,
    pub sources: Vec<Arc<dyn DonationSource>>,
}

/// Result of a session that reached its end page.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub outcomes: Vec<SourceReport>,
    pub exit_code: i32,
    pub exit_message: String,
    /// Commands handed to the host, diagnostics included.
    pub commands_emitted: usize,
}

#[derive(Debug, Error)]
pub enum RunSessionError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Session closed without an exit command")]
    MissingExit,
}

impl RunSessionError {
    /// Flattens the error for structured reporting.
    pub fn to_domain_error(&self) -> DomainError {
        match self {
            RunSessionError::Flow(err) => DomainError::from(err),
            RunSessionError::Host(err) => DomainError::new(ErrorCode::HostError, err.to_string()),
            RunSessionError::MissingExit => {
                DomainError::new(ErrorCode::InternalError, self.to_string())
            }
        }
    }
}

/// Handler running a session to completion.
///
/// Every emitted command is performed on the host and the flow is resumed
/// with the host's answer. A failed tracking donation is logged and the
/// session continues; any other host failure ends the run.
pub struct RunSessionHandler {
    host: Arc<dyn DonationHost>,
}

impl RunSessionHandler {
    pub fn new(host: Arc<dyn DonationHost>) -> Self {
        Self { host }
    }

    pub async fn handle(&self, cmd: RunSessionCommand) -> Result<SessionReport, RunSessionError> {
        let mut flow = SessionFlow::new(cmd.session_id, cmd.sources);
        let mut emission = flow.start()?;
        let mut exit = None;
        let mut commands_emitted = 0;

        loop {
            commands_emitted += 1;
            let reply = match &emission.command {
                OutboundCommand::Render { page } => {
                    let answer = self.host.render(page).await?;
                    emission.awaits_reply.then_some(answer)
                }
                OutboundCommand::Donate { key, payload } => {
                    match self.host.donate(key, payload).await {
                        Ok(()) => {}
                        Err(err) if emission.diagnostic => {
                            tracing::warn!(
                                session_id = %flow.session_id(),
                                key = %key,
                                error = %err,
                                "Tracking donation failed"
                            );
                        }
                        Err(err) => return Err(err.into()),
                    }
                    None
                }
                OutboundCommand::Exit { code, message } => {
                    self.host.exit(*code, message).await?;
                    exit = Some((*code, message.clone()));
                    None
                }
            };

            match flow.resume(emission.seq, reply)? {
                Some(next) => emission = next,
                None => break,
            }
        }

        let (exit_code, exit_message) = exit.ok_or(RunSessionError::MissingExit)?;
        Ok(SessionReport {
            session_id: flow.session_id().clone(),
            outcomes: flow.reports().to_vec(),
            exit_code,
            exit_message,
            commands_emitted,
        })
    }
}
