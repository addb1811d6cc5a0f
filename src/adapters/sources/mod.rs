//! Donation source adapters.

mod json_export;

pub use json_export::{JsonExportSource, STATUS_MISSING_KEY, STATUS_NOT_JSON};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::ports::DonationSource;

/// Builds the configured sources, in prompt order.
pub fn from_config(config: &AppConfig) -> Vec<Arc<dyn DonationSource>> {
    config
        .sources
        .iter()
        .map(|source| {
            Arc::new(JsonExportSource::from_config(source, &config.flow.accepted_types))
                as Arc<dyn DonationSource>
        })
        .collect()
}
