//! Application handlers.
//!
//! Command handlers that orchestrate the session flow against its ports.

pub mod session;

pub use session::{RunSessionCommand, RunSessionError, RunSessionHandler, SessionReport};
