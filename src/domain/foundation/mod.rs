//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that form the vocabulary of the donation domain.

mod errors;
mod ids;
mod progress;
mod state_machine;
mod timestamp;
mod translatable;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::SessionId;
pub use progress::Progress;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use translatable::Translatable;
