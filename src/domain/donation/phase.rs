//! Session flow phases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where the session flow currently stands.
///
/// The `Await*` phases are suspension points: the flow has emitted an
/// interactive page and waits for the host's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    /// Created but not started.
    #[default]
    Idle,
    AwaitFile,
    AwaitRetryDecision,
    AwaitConsent,
    AwaitQuestionnaire,
    /// Exit and end page queued or emitted.
    Finished,
    /// Host acknowledged the end page.
    Closed,
    /// A collaborator failed; the session cannot continue.
    Faulted,
}

impl FlowPhase {
    /// Returns true if the flow is suspended on a user reply.
    pub fn awaits_reply(&self) -> bool {
        matches!(
            self,
            Self::AwaitFile
                | Self::AwaitRetryDecision
                | Self::AwaitConsent
                | Self::AwaitQuestionnaire
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitFile => "await_file",
            Self::AwaitRetryDecision => "await_retry_decision",
            Self::AwaitConsent => "await_consent",
            Self::AwaitQuestionnaire => "await_questionnaire",
            Self::Finished => "finished",
            Self::Closed => "closed",
            Self::Faulted => "faulted",
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl StateMachine for FlowPhase {
    fn valid_transitions(&self) -> Vec<Self> {
        use FlowPhase::*;
        match self {
            Idle => vec![AwaitFile, Finished],
            // AwaitFile -> AwaitFile covers a skip followed by the next source.
            AwaitFile => vec![AwaitFile, AwaitRetryDecision, AwaitConsent, Finished, Faulted],
            AwaitRetryDecision => vec![AwaitFile, Finished],
            AwaitConsent => vec![AwaitQuestionnaire, AwaitFile, Finished],
            AwaitQuestionnaire => vec![AwaitFile, Finished],
            Finished => vec![Closed],
            Closed | Faulted => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FlowPhase; 8] = [
        FlowPhase::Idle,
        FlowPhase::AwaitFile,
        FlowPhase::AwaitRetryDecision,
        FlowPhase::AwaitConsent,
        FlowPhase::AwaitQuestionnaire,
        FlowPhase::Finished,
        FlowPhase::Closed,
        FlowPhase::Faulted,
    ];

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(FlowPhase::default(), FlowPhase::Idle);
    }

    #[test]
    fn closed_and_faulted_are_terminal() {
        assert!(FlowPhase::Closed.is_terminal());
        assert!(FlowPhase::Faulted.is_terminal());
        assert!(!FlowPhase::Finished.is_terminal());
    }

    #[test]
    fn only_await_phases_await_replies() {
        let awaiting: Vec<_> = ALL.iter().filter(|p| p.awaits_reply()).collect();
        assert_eq!(awaiting.len(), 4);
        assert!(!FlowPhase::Idle.awaits_reply());
        assert!(!FlowPhase::Finished.awaits_reply());
    }

    #[test]
    fn retry_cannot_jump_to_consent() {
        assert!(!FlowPhase::AwaitRetryDecision.can_transition_to(&FlowPhase::AwaitConsent));
        assert!(FlowPhase::AwaitFile.can_transition_to(&FlowPhase::AwaitConsent));
    }

    #[test]
    fn every_non_terminal_phase_can_reach_finished_or_closed() {
        for phase in ALL {
            if phase.is_terminal() {
                continue;
            }
            let targets = phase.valid_transitions();
            assert!(
                targets.contains(&FlowPhase::Finished) || targets.contains(&FlowPhase::Closed),
                "{:?} cannot finish",
                phase
            );
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&FlowPhase::AwaitRetryDecision).unwrap();
        assert_eq!(json, "\"await_retry_decision\"");
        assert_eq!(FlowPhase::AwaitRetryDecision.label(), "await_retry_decision");
    }
}
