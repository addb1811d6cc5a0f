//! Source definitions for JSON platform exports

use serde::Deserialize;
use std::collections::HashSet;

use super::error::ValidationError;

/// One table to extract from a JSON export
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct JsonTableConfig {
    /// Table id, unique within the source
    pub id: String,

    /// English title
    pub title_en: String,

    /// Dutch title; falls back to the English title
    #[serde(default)]
    pub title_nl: Option<String>,

    /// JSON pointer (RFC 6901) to an array of objects
    pub pointer: String,
}

/// A data source backed by a JSON export
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct JsonSourceConfig {
    /// Platform name shown to the user and used as donation key
    pub name: String,

    /// File types for the prompt; defaults to `flow.accepted_types`
    #[serde(default)]
    pub accepted_types: Option<String>,

    /// Pointers that must exist for a file to be recognized
    #[serde(default)]
    pub required_keys: Vec<String>,

    /// Tables to extract
    #[serde(default)]
    pub tables: Vec<JsonTableConfig>,

    /// Pointer to the group names for the follow-up questionnaire
    #[serde(default)]
    pub groups_pointer: Option<String>,

    /// Member of a zip export holding the JSON document; defaults to the
    /// first `.json` member
    #[serde(default)]
    pub archive_member: Option<String>,
}

impl JsonSourceConfig {
    /// Validate a single source definition
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptySourceName);
        }
        if self.tables.is_empty() {
            return Err(ValidationError::NoTables(self.name.clone()));
        }
        let mut ids = HashSet::new();
        for table in &self.tables {
            if !ids.insert(table.id.as_str()) {
                return Err(ValidationError::DuplicateTable {
                    source_name: self.name.clone(),
                    table: table.id.clone(),
                });
            }
            validate_pointer(&table.pointer)?;
        }
        for pointer in self.required_keys.iter().chain(self.groups_pointer.iter()) {
            validate_pointer(pointer)?;
        }
        Ok(())
    }
}

/// Validate a list of sources, including name uniqueness
pub fn validate_sources(sources: &[JsonSourceConfig]) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for source in sources {
        source.validate()?;
        if !names.insert(source.name.as_str()) {
            return Err(ValidationError::DuplicateSource(source.name.clone()));
        }
    }
    Ok(())
}

fn validate_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() || pointer.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::InvalidPointer(pointer.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str) -> JsonSourceConfig {
        JsonSourceConfig {
            name: name.to_string(),
            accepted_types: None,
            required_keys: vec!["/comments".to_string()],
            tables: vec![JsonTableConfig {
                id: "comments".to_string(),
                title_en: "Comments".to_string(),
                title_nl: Some("Reacties".to_string()),
                pointer: "/comments".to_string(),
            }],
            groups_pointer: None,
            archive_member: None,
        }
    }

    #[test]
    fn test_valid_source() {
        assert!(source("Facebook").validate().is_ok());
    }

    #[test]
    fn test_source_without_tables_rejected() {
        let mut s = source("Facebook");
        s.tables.clear();
        assert_eq!(s.validate(), Err(ValidationError::NoTables("Facebook".into())));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut s = source("Facebook");
        s.tables.push(s.tables[0].clone());
        assert!(matches!(
            s.validate(),
            Err(ValidationError::DuplicateTable { .. })
        ));
    }

    #[test]
    fn test_relative_pointer_rejected() {
        let mut s = source("Facebook");
        s.groups_pointer = Some("groups".to_string());
        assert_eq!(
            s.validate(),
            Err(ValidationError::InvalidPointer("groups".into()))
        );
    }

    #[test]
    fn test_duplicate_source_names_rejected() {
        let result = validate_sources(&[source("Facebook"), source("Facebook")]);
        assert_eq!(result, Err(ValidationError::DuplicateSource("Facebook".into())));
    }

    #[test]
    fn test_source_deserialization() {
        let json = r#"{
            "name": "Instagram",
            "tables": [{"id": "likes", "title_en": "Likes", "pointer": "/likes"}],
            "groups_pointer": "/groups"
        }"#;
        let s: JsonSourceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(s.name, "Instagram");
        assert!(s.required_keys.is_empty());
        assert_eq!(s.tables[0].title_nl, None);
        assert_eq!(s.groups_pointer.as_deref(), Some("/groups"));
        assert_eq!(s.archive_member, None);
    }
}
