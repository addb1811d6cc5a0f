//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the session flow to external systems:
//! - `host` - Host runtimes (JSON lines over stdio, scripted)
//! - `sources` - Platform export sources configured from JSON pointers

pub mod host;
pub mod sources;

pub use host::{JsonLinesHost, ScriptedHost};
pub use sources::JsonExportSource;
