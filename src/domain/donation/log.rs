//! Session-scoped tracking log.
//!
//! Entries are append-only. The whole log is periodically donated under the
//! session's tracking key so researchers can see where participants stopped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Payload donated when nothing has been logged yet.
pub const EMPTY_LOG_LINE: &str = "no logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: Timestamp,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --- {} --- {}", self.at, self.level, self.message)
    }
}

/// Append-only log owned by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
    flushed: usize,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Timestamp::now(),
            level,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns true if entries were added since the last flush.
    pub fn has_unflushed(&self) -> bool {
        self.flushed < self.entries.len()
    }

    /// Formatted lines for every entry.
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_LOG_LINE.to_string()];
        }
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Serializes the full log as a JSON list of lines and marks every
    /// entry as flushed.
    pub fn flush(&mut self) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_string(&self.lines())?;
        self.flushed = self.entries.len();
        Ok(payload)
    }
}
