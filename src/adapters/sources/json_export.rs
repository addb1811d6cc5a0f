//! JSON export source.
//!
//! Validates and extracts platform exports delivered as a JSON document,
//! either as a plain file or as a member of a zip archive. Which tables to
//! extract is configuration: each table is a JSON pointer (RFC 6901) to an
//! array of records.

use std::io::{Cursor, Read};

use serde_json::{Map, Value};
use zip::ZipArchive;

use crate::config::{JsonSourceConfig, JsonTableConfig};
use crate::domain::donation::{SubmittedFile, Table, ValidationResult};
use crate::domain::foundation::Translatable;
use crate::ports::{DonationSource, SourceError};

/// The file is not a UTF-8 JSON document.
pub const STATUS_NOT_JSON: i32 = 1;

/// The document lacks a key this platform's exports always have.
pub const STATUS_MISSING_KEY: i32 = 2;

/// The file is a zip archive without the expected JSON member.
pub const STATUS_MISSING_MEMBER: i32 = 3;

/// Local file header signature that starts every zip archive.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Column used for records that are plain values rather than objects.
const VALUE_COLUMN: &str = "value";

/// Source backed by a configurable JSON export layout.
#[derive(Debug, Clone)]
pub struct JsonExportSource {
    name: String,
    accepted_types: String,
    required_keys: Vec<String>,
    tables: Vec<JsonTableConfig>,
    groups_pointer: Option<String>,
    archive_member: Option<String>,
}

/// Why a submitted file did not yield a JSON document.
#[derive(Debug)]
enum Unreadable {
    NotJson,
    BadArchive,
    MissingMember(String),
}

impl Unreadable {
    fn status_code(&self) -> i32 {
        match self {
            Unreadable::NotJson | Unreadable::BadArchive => STATUS_NOT_JSON,
            Unreadable::MissingMember(_) => STATUS_MISSING_MEMBER,
        }
    }

    fn description(&self) -> String {
        match self {
            Unreadable::NotJson => "not a UTF-8 JSON document".to_string(),
            Unreadable::BadArchive => "not a readable zip archive".to_string(),
            Unreadable::MissingMember(member) => format!("archive has no member {}", member),
        }
    }
}

impl From<Unreadable> for SourceError {
    fn from(err: Unreadable) -> Self {
        SourceError::unreadable(err.description())
    }
}

impl JsonExportSource {
    /// Builds a source from its definition; `default_types` applies when the
    /// definition sets no accepted types.
    pub fn from_config(config: &JsonSourceConfig, default_types: &str) -> Self {
        Self {
            name: config.name.clone(),
            accepted_types: config
                .accepted_types
                .clone()
                .unwrap_or_else(|| default_types.to_string()),
            required_keys: config.required_keys.clone(),
            tables: config.tables.clone(),
            groups_pointer: config.groups_pointer.clone(),
            archive_member: config.archive_member.clone(),
        }
    }

    /// Reads the JSON document from a plain file or a zip archive.
    fn document(&self, file: &SubmittedFile) -> Result<Value, Unreadable> {
        if file.as_bytes().starts_with(ZIP_MAGIC) {
            let text = self.read_member(file.as_bytes())?;
            return parse_json(&text).ok_or(Unreadable::NotJson);
        }
        file.as_text().and_then(parse_json).ok_or(Unreadable::NotJson)
    }

    /// Reads the configured member, or the first `.json` member by name.
    fn read_member(&self, bytes: &[u8]) -> Result<String, Unreadable> {
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|_| Unreadable::BadArchive)?;

        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        let found = match &self.archive_member {
            Some(member) => {
                let nested = format!("/{}", member);
                names
                    .into_iter()
                    .find(|name| *name == member.as_str() || name.ends_with(&nested))
            }
            None => names.into_iter().find(|name| name.ends_with(".json")),
        }
        .map(str::to_string);

        let Some(name) = found else {
            let wanted = self.archive_member.as_deref().unwrap_or("*.json");
            return Err(Unreadable::MissingMember(wanted.to_string()));
        };
        let mut entry = archive.by_name(&name).map_err(|_| Unreadable::BadArchive)?;
        let mut text = String::new();
        entry
            .read_to_string(&mut text)
            .map_err(|_| Unreadable::NotJson)?;
        tracing::debug!(source = %self.name, member = %name, "Read export from archive");
        Ok(text)
    }

    fn build_table(spec: &JsonTableConfig, items: &[Value]) -> Result<Table, SourceError> {
        let mut columns: Vec<String> = Vec::new();
        for item in items {
            match item {
                Value::Object(map) => {
                    for key in map.keys() {
                        if !columns.iter().any(|c| c == key) {
                            columns.push(key.clone());
                        }
                    }
                }
                _ => {
                    if !columns.iter().any(|c| c == VALUE_COLUMN) {
                        columns.push(VALUE_COLUMN.to_string());
                    }
                }
            }
        }

        let rows = items.iter().map(|item| row_for(item, &columns)).collect();
        let title = Translatable::en_nl(
            spec.title_en.clone(),
            spec.title_nl.clone().unwrap_or_else(|| spec.title_en.clone()),
        );
        Ok(Table::new(spec.id.clone(), title, columns, rows)?)
    }
}

impl DonationSource for JsonExportSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepted_types(&self) -> &str {
        &self.accepted_types
    }

    fn validate(&self, file: &SubmittedFile) -> Result<ValidationResult, SourceError> {
        let document = match self.document(file) {
            Ok(document) => document,
            Err(err) => {
                return Ok(ValidationResult::unrecognized(
                    err.status_code(),
                    err.description(),
                ));
            }
        };
        if let Some(missing) = self
            .required_keys
            .iter()
            .find(|key| document.pointer(key).is_none())
        {
            return Ok(ValidationResult::unrecognized(
                STATUS_MISSING_KEY,
                format!("missing required key {}", missing),
            ));
        }
        tracing::debug!(source = %self.name, bytes = file.len(), "Export recognized");
        Ok(ValidationResult::recognized())
    }

    fn extract(
        &self,
        file: &SubmittedFile,
        _validation: &ValidationResult,
    ) -> Result<Vec<Table>, SourceError> {
        let document = self.document(file)?;

        let mut tables = Vec::new();
        for spec in &self.tables {
            match document.pointer(&spec.pointer) {
                None => {
                    tracing::debug!(source = %self.name, table = %spec.id, "Table not present");
                }
                Some(Value::Array(items)) if items.is_empty() => {}
                Some(Value::Array(items)) => tables.push(Self::build_table(spec, items)?),
                Some(_) => {
                    return Err(SourceError::extraction(&spec.id, "expected an array"));
                }
            }
        }
        Ok(tables)
    }

    fn group_list(&self, file: &SubmittedFile) -> Result<Vec<String>, SourceError> {
        let Some(pointer) = &self.groups_pointer else {
            return Ok(Vec::new());
        };
        let document = self.document(file)?;

        match document.pointer(pointer) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.iter().filter_map(group_name).collect()),
            Some(_) => Err(SourceError::extraction("groups", "expected an array")),
        }
    }
}

fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim_start_matches('\u{feff}')).ok()
}

fn row_for(item: &Value, columns: &[String]) -> Vec<String> {
    match item {
        Value::Object(map) => columns.iter().map(|c| cell(map.get(c))).collect(),
        other => columns
            .iter()
            .map(|c| if c == VALUE_COLUMN { cell(Some(other)) } else { String::new() })
            .collect(),
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn group_name(item: &Value) -> Option<String> {
    match item {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => name_field(map),
        _ => None,
    }
}

fn name_field(map: &Map<String, Value>) -> Option<String> {
    map.get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
