//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `donation` - Donation session flow, pages and protocol types

pub mod donation;
pub mod foundation;
