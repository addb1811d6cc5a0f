//! Host adapters.
//!
//! - `JsonLinesHost` - JSON lines over a reader/writer pair (stdio by default)
//! - `ScriptedHost` - In-memory host replaying prepared answers, for tests

mod json_lines;
mod scripted;

pub use json_lines::JsonLinesHost;
pub use scripted::ScriptedHost;
