//! Scripted host for testing.
//!
//! Answers pages from a queue of prepared replies and records every command
//! it receives, so tests can assert on the exact sequence a session produced.

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::domain::donation::{InboundResult, OutboundCommand, Page};
use crate::ports::{DonationHost, HostError};

/// In-memory host replaying scripted user answers.
///
/// # Example
///
/// ```ignore
/// let host = Arc::new(ScriptedHost::new([
///     InboundResult::PayloadString(export),
///     InboundResult::PayloadTrue,
/// ]));
/// handler.handle(cmd).await?;
/// assert!(host.commands().last().unwrap().is_render_of(PageKind::End));
/// ```
#[derive(Debug, Default)]
pub struct ScriptedHost {
    replies: Mutex<VecDeque<InboundResult>>,
    commands: Mutex<Vec<OutboundCommand>>,
    rejected_keys: Mutex<HashSet<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedHost {
    pub fn new(replies: impl IntoIterator<Item = InboundResult>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Makes donations under `key` fail with [`HostError::Rejected`].
    pub fn reject_donations_to(self, key: impl Into<String>) -> Self {
        lock(&self.rejected_keys).insert(key.into());
        self
    }

    // === Test Helpers ===

    /// Every command received so far, in order.
    pub fn commands(&self) -> Vec<OutboundCommand> {
        lock(&self.commands).clone()
    }

    /// Payloads donated under `key`, in order.
    pub fn donations_to(&self, key: &str) -> Vec<String> {
        lock(&self.commands)
            .iter()
            .filter_map(|command| match command {
                OutboundCommand::Donate { key: k, payload } if k == key => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    /// Replies not consumed by the session.
    pub fn remaining_replies(&self) -> usize {
        lock(&self.replies).len()
    }
}

#[async_trait]
impl DonationHost for ScriptedHost {
    async fn render(&self, page: &Page) -> Result<InboundResult, HostError> {
        lock(&self.commands).push(OutboundCommand::Render { page: page.clone() });
        if !page.kind().awaits_reply() {
            return Ok(InboundResult::PayloadVoid);
        }
        lock(&self.replies).pop_front().ok_or(HostError::Closed)
    }

    async fn donate(&self, key: &str, payload: &str) -> Result<(), HostError> {
        lock(&self.commands).push(OutboundCommand::Donate {
            key: key.to_string(),
            payload: payload.to_string(),
        });
        if lock(&self.rejected_keys).contains(key) {
            return Err(HostError::Rejected(format!("donation to {} refused", key)));
        }
        Ok(())
    }

    async fn exit(&self, code: i32, message: &str) -> Result<(), HostError> {
        lock(&self.commands).push(OutboundCommand::Exit {
            code,
            message: message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donation::{prompt_file, render_donation_page};
    use crate::domain::foundation::Progress;

    fn prompt() -> Page {
        render_donation_page("X", prompt_file("text/plain", "X"), Progress::ZERO)
            .page()
            .cloned()
            .unwrap()
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let host = ScriptedHost::new([InboundResult::PayloadTrue, InboundResult::PayloadFalse]);
        assert_eq!(host.render(&prompt()).await.unwrap(), InboundResult::PayloadTrue);
        assert_eq!(host.render(&prompt()).await.unwrap(), InboundResult::PayloadFalse);
        assert!(matches!(host.render(&prompt()).await, Err(HostError::Closed)));
        assert_eq!(host.commands().len(), 3);
    }

    #[tokio::test]
    async fn rejected_keys_fail_but_are_recorded() {
        let host = ScriptedHost::default().reject_donations_to("s-tracking");
        assert!(host.donate("X", "[]").await.is_ok());
        assert!(matches!(
            host.donate("s-tracking", "[]").await,
            Err(HostError::Rejected(_))
        ));
        assert_eq!(host.donations_to("s-tracking"), vec!["[]".to_string()]);
    }
}
