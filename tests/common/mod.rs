//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Arc;

use data_donation::adapters::JsonExportSource;
use data_donation::config::{FlowConfig, JsonSourceConfig, JsonTableConfig};
use data_donation::domain::donation::{InboundResult, OutboundCommand};
use data_donation::ports::DonationSource;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// A source reading `/comments` and `/likes`, requiring `/comments`, with
/// questionnaire groups under `/groups`.
pub fn platform(name: &str) -> Arc<dyn DonationSource> {
    let table = |id: &str, pointer: &str| JsonTableConfig {
        id: format!("{}_{}", name.to_lowercase(), id),
        title_en: format!("{} {}", name, id),
        title_nl: None,
        pointer: pointer.to_string(),
    };
    let config = JsonSourceConfig {
        name: name.to_string(),
        accepted_types: None,
        required_keys: vec!["/comments".to_string()],
        tables: vec![table("comments", "/comments"), table("likes", "/likes")],
        groups_pointer: Some("/groups".to_string()),
        archive_member: None,
    };
    Arc::new(JsonExportSource::from_config(
        &config,
        &FlowConfig::default().accepted_types,
    ))
}

/// An export the source recognizes.
pub fn export(with_records: bool, groups: &[&str]) -> InboundResult {
    let records = if with_records {
        serde_json::json!([{"text": "first"}, {"text": "second"}])
    } else {
        serde_json::json!([])
    };
    InboundResult::PayloadString(
        serde_json::json!({
            "comments": records,
            "likes": records,
            "groups": groups,
        })
        .to_string(),
    )
}

/// A zip archive with a single JSON member, as submitted from a browser.
pub fn zipped_export(member: &str, json: &serde_json::Value) -> InboundResult {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut buffer);
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(member, options).unwrap();
        zip.write_all(json.to_string().as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    InboundResult::PayloadBytes(buffer.into_inner())
}

/// A file the source does not recognize.
pub fn garbage() -> InboundResult {
    InboundResult::PayloadString("this is not an export".to_string())
}

pub fn consent(payload: &str) -> InboundResult {
    InboundResult::PayloadJson(payload.to_string())
}

/// One label per command, e.g. `render:FilePrompt` or `donate:abc-tracking`.
pub fn shape(commands: &[OutboundCommand]) -> Vec<String> {
    commands
        .iter()
        .map(|command| match command {
            OutboundCommand::Render { page } => format!("render:{:?}", page.kind()),
            OutboundCommand::Donate { key, .. } => format!("donate:{}", key),
            OutboundCommand::Exit { code, .. } => format!("exit:{}", code),
        })
        .collect()
}
