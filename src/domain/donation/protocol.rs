//! Messages exchanged with the host runtime.

use serde::{Deserialize, Serialize};

use super::page::{Page, PageKind};

/// A command emitted by the session flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum OutboundCommand {
    /// Show a page; interactive pages are answered with an [`InboundResult`].
    Render { page: Page },
    /// Hand a serialized payload to the host's donation sink.
    Donate { key: String, payload: String },
    /// End the session.
    Exit { code: i32, message: String },
}

impl OutboundCommand {
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Render { page } => Some(page),
            _ => None,
        }
    }

    pub fn page_kind(&self) -> Option<PageKind> {
        self.page().map(Page::kind)
    }

    pub fn is_render_of(&self, kind: PageKind) -> bool {
        self.page_kind() == Some(kind)
    }

    /// Returns the donation key, if this is a donate command.
    pub fn donation_key(&self) -> Option<&str> {
        match self {
            Self::Donate { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    /// Returns true if the host must resume the flow with a user reply.
    pub fn awaits_reply(&self) -> bool {
        self.page_kind().is_some_and(|kind| kind.awaits_reply())
    }
}

/// The user's answer to a rendered page, as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__type__", content = "value")]
pub enum InboundResult {
    /// File submitted as text content.
    PayloadString(String),
    /// File submitted as binary content.
    PayloadBytes(Vec<u8>),
    PayloadTrue,
    PayloadFalse,
    /// Structured answer, already serialized as JSON.
    #[serde(rename = "PayloadJSON")]
    PayloadJson(String),
    /// No answer; the user skipped.
    PayloadVoid,
}

impl InboundResult {
    /// Converts a file payload into a submitted file.
    pub fn into_file(self) -> Option<SubmittedFile> {
        match self {
            Self::PayloadString(text) => Some(SubmittedFile::Text(text)),
            Self::PayloadBytes(bytes) => Some(SubmittedFile::Binary(bytes)),
            _ => None,
        }
    }

    /// Converts a structured payload into its JSON string.
    pub fn into_json(self) -> Option<String> {
        match self {
            Self::PayloadJson(json) => Some(json),
            _ => None,
        }
    }

    pub fn is_affirmative(&self) -> bool {
        matches!(self, Self::PayloadTrue)
    }

    /// Wire name of the variant, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PayloadString(_) => "PayloadString",
            Self::PayloadBytes(_) => "PayloadBytes",
            Self::PayloadTrue => "PayloadTrue",
            Self::PayloadFalse => "PayloadFalse",
            Self::PayloadJson(_) => "PayloadJSON",
            Self::PayloadVoid => "PayloadVoid",
        }
    }
}

/// A file the user submitted in response to a file prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedFile {
    Text(String),
    Binary(Vec<u8>),
}

impl SubmittedFile {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Returns the content as UTF-8 text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One command handed to the host, with its continuation token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    /// Token the host passes back to `resume`.
    pub seq: u64,
    pub command: OutboundCommand,
    /// True if `resume` must be called with a reply.
    pub awaits_reply: bool,
    /// True for tracking-log donations, whose delivery failures are ignored.
    pub diagnostic: bool,
}
