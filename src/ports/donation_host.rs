//! Donation Host Port - the runtime that renders pages and stores donations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::donation::{InboundResult, Page};

/// Port for the host runtime driving a session.
///
/// # Contract
///
/// - `render` shows a page. For pages that await a reply it returns the
///   user's answer; for the end page it returns `PayloadVoid`.
/// - `donate` hands a payload to the host's persistence sink.
/// - `exit` reports the session's exit code.
#[async_trait]
pub trait DonationHost: Send + Sync {
    async fn render(&self, page: &Page) -> Result<InboundResult, HostError>;

    async fn donate(&self, key: &str, payload: &str) -> Result<(), HostError>;

    async fn exit(&self, code: i32, message: &str) -> Result<(), HostError>;
}

/// Errors raised by host implementations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Host closed the channel while a reply was expected")]
    Closed,

    #[error("Malformed host message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Host rejected the command: {0}")]
    Rejected(String),
}
