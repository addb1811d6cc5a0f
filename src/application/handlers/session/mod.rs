//! Session command handlers.

mod run_session;

pub use run_session::{RunSessionCommand, RunSessionError, RunSessionHandler, SessionReport};
