//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the session flow and the outside world. Adapters implement these ports.
//!
//! ## Source Ports
//!
//! - `DonationSource` - Validates and extracts one platform's export
//!
//! ## Host Ports
//!
//! - `DonationHost` - Renders pages, stores donations, receives the exit code

mod donation_host;
mod donation_source;

pub use donation_host::{DonationHost, HostError};
pub use donation_source::{DonationSource, SourceError, DEFAULT_ACCEPTED_TYPES};
