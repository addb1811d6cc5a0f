//! Localized text bundles.
//!
//! Labels carry every locale variant; picking one is the host's concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bundle of locale -> text pairs for one label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translatable(BTreeMap<String, String>);

impl Translatable {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bundle with English and Dutch variants.
    pub fn en_nl(en: impl Into<String>, nl: impl Into<String>) -> Self {
        Self::new().with("en", en).with("nl", nl)
    }

    /// Creates a bundle using the same text for English and Dutch.
    ///
    /// Used for user data such as platform and group names.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::en_nl(text.clone(), text)
    }

    /// Adds or replaces a locale variant.
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(locale.into(), text.into());
        self
    }

    /// Returns the text for a locale, if present.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_nl_has_both_locales() {
        let t = Translatable::en_nl("Skip", "Overslaan");
        assert_eq!(t.get("en"), Some("Skip"));
        assert_eq!(t.get("nl"), Some("Overslaan"));
        assert_eq!(t.get("de"), None);
    }

    #[test]
    fn same_duplicates_text() {
        let t = Translatable::same("Facebook");
        assert_eq!(t.get("en"), Some("Facebook"));
        assert_eq!(t.get("nl"), Some("Facebook"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let t = Translatable::en_nl("Yes", "Ja");
        assert_eq!(serde_json::to_string(&t).unwrap(), r#"{"en":"Yes","nl":"Ja"}"#);
    }
}
