//! Application layer - Commands and Handlers.
//!
//! This layer drives the session flow and coordinates between ports.

pub mod handlers;

pub use handlers::{RunSessionCommand, RunSessionError, RunSessionHandler, SessionReport};
