//! User mapping overlay deserialization.
//!
//! The overlay is a two-level key-value structure: categories as top-level
//! keys, each mapping literal values to replacement strings, plus an optional
//! `patterns` section keyed by category. How the JSON text reaches this
//! module (file, stdin, embedded) is the caller's concern.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::mapping::{Category, MappingLayer};
use crate::{Error, Result};

/// Deserialized user mapping configuration.
///
/// ```json
/// {
///   "colors": { "#ff3366": "var(--color-brand)" },
///   "spacing": { "10px": "var(--spacing-sm)" },
///   "patterns": {
///     "colors": [
///       { "match": "^#f{3,6}$", "replace": "var(--color-background)" }
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    #[serde(flatten)]
    categories: BTreeMap<String, HashMap<String, String>>,
    patterns: BTreeMap<String, Vec<PatternConfig>>,
}

/// One pattern entry: a regular expression and its replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    #[serde(rename = "match")]
    pub match_expr: String,
    pub replace: String,
}

impl MappingConfig {
    /// Parse an overlay from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Convert into a mapping layer, validating category keys and patterns.
    pub fn into_layer(self) -> Result<MappingLayer> {
        let mut layer = MappingLayer::new();

        for (key, entries) in self.categories {
            let category = Category::from_config_key(&key)
                .ok_or_else(|| Error::Config(format!("unknown category '{key}'")))?;
            for (from, to) in entries {
                layer.insert(category, from, to);
            }
        }

        for (key, patterns) in self.patterns {
            let category = Category::from_config_key(&key)
                .ok_or_else(|| Error::Config(format!("unknown pattern category '{key}'")))?;
            for entry in patterns {
                layer.insert_pattern(category, &entry.match_expr, entry.replace)?;
            }
        }

        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingTable;

    #[test]
    fn overlay_parses_and_overrides() {
        let json = r##"
        {
            "colors": { "#007bff": "var(--brand-blue)" },
            "spacing": { "10px": "var(--spacing-sm)" }
        }
        "##;
        let layer = MappingConfig::from_json(json).unwrap().into_layer().unwrap();
        let table = MappingTable::with_overlay(layer);

        assert_eq!(table.map_value("color", "#007bff"), "var(--brand-blue)");
        assert_eq!(table.map_value("padding", "10px"), "var(--spacing-sm)");
    }

    #[test]
    fn pattern_section_round_trips() {
        let json = r##"
        {
            "patterns": {
                "colors": [
                    { "match": "^#f{3}$", "replace": "var(--color-background)" }
                ]
            }
        }
        "##;
        let layer = MappingConfig::from_json(json).unwrap().into_layer().unwrap();
        let table = MappingTable::with_overlay(layer);
        assert_eq!(table.map_value("color", "#fff"), "var(--color-background)");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let json = r#"{ "gradients": { "a": "b" } }"#;
        let err = MappingConfig::from_json(json).unwrap().into_layer().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let json = r#"{ "patterns": { "colors": [ { "match": "(", "replace": "x" } ] } }"#;
        let err = MappingConfig::from_json(json).unwrap().into_layer().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
