//! Data Donation - Consent-driven data donation sessions
//!
//! This crate drives a participant through donating data from one or more
//! platform exports: prompt for a file, validate and extract it, show the
//! extracted tables for consent, and donate only what was approved. The
//! session flow is a resumable state machine; the host that renders pages
//! and stores donations sits behind a port.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
