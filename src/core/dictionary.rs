//! Dictionary document loading.
//!
//! The document is JSON with two top-level fields:
//!
//! ```json
//! {
//!   "categories": { "<category>": { "<glyph>": { "en": "...", "zh": "...", "keywords": ["..."] } } },
//!   "sequences": { "canonical": [ { "sequence": "<glyphs>", "...": "..." } ] }
//! }
//! ```
//!
//! Shape is checked up front so a corrupted asset fails at construction
//! instead of quietly producing an engine that never matches anything.

use crate::core::types::{CanonicalSequence, Category, GlyphEntry};
use crate::error::{GlyphError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The static glyph catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    pub categories: Vec<Category>,
    pub canonical: Vec<CanonicalSequence>,
}

impl Dictionary {
    /// The fallback a host uses when the real asset cannot be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let root = as_object(value, "dictionary root")?;

        let categories = as_object(required(root, "categories", "dictionary root")?, "`categories`")?
            .iter()
            .map(|(name, glyphs)| parse_category(name, glyphs))
            .collect::<Result<Vec<_>>>()?;

        let sequences = as_object(required(root, "sequences", "dictionary root")?, "`sequences`")?;
        let canonical = match required(sequences, "canonical", "`sequences`")? {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| parse_canonical(i, item))
                .collect::<Result<Vec<_>>>()?,
            _ => return Err(malformed("`sequences.canonical` must be an array")),
        };

        Ok(Self { categories, canonical })
    }

    /// Total number of glyph entries across all categories, duplicates included.
    pub fn glyph_count(&self) -> usize {
        self.categories.iter().map(|c| c.glyphs.len()).sum()
    }
}

fn parse_category(name: &str, value: &Value) -> Result<Category> {
    let glyphs = as_object(value, &format!("category `{}`", name))?
        .iter()
        .map(|(glyph, entry)| parse_entry(name, glyph, entry))
        .collect::<Result<Vec<_>>>()?;
    Ok(Category { name: name.to_string(), glyphs })
}

fn parse_entry(category: &str, glyph: &str, value: &Value) -> Result<GlyphEntry> {
    if glyph.is_empty() {
        return Err(malformed(&format!("empty glyph symbol in category `{}`", category)));
    }
    let entry = as_object(value, &format!("entry `{}` in category `{}`", glyph, category))?;

    let mut glosses = BTreeMap::new();
    let mut keywords = Vec::new();
    for (field, v) in entry {
        match (field.as_str(), v) {
            ("keywords", Value::Null) => {}
            ("keywords", Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::String(k) => keywords.push(k.clone()),
                        _ => {
                            return Err(malformed(&format!(
                                "keywords of `{}` must be strings",
                                glyph
                            )))
                        }
                    }
                }
            }
            ("keywords", _) => {
                return Err(malformed(&format!("keywords of `{}` must be an array", glyph)))
            }
            (lang, Value::String(text)) => {
                glosses.insert(lang.to_string(), text.clone());
            }
            // Non-string metadata is not a gloss.
            _ => {}
        }
    }

    Ok(GlyphEntry { glyph: glyph.to_string(), glosses, keywords })
}

fn parse_canonical(index: usize, value: &Value) -> Result<CanonicalSequence> {
    let record = as_object(value, &format!("canonical sequence #{}", index))?;
    let sequence = match record.get("sequence") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            return Err(malformed(&format!(
                "canonical sequence #{} needs a string `sequence`",
                index
            )))
        }
    };
    // `partial` is set by the matcher, never carried from the document.
    let metadata = record
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "sequence" | "partial"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok(CanonicalSequence { sequence, metadata })
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str, owner: &str) -> Result<&'a Value> {
    obj.get(field)
        .ok_or_else(|| malformed(&format!("{} is missing `{}`", owner, field)))
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(&format!("{} must be an object", what)))
}

fn malformed(message: &str) -> GlyphError {
    GlyphError::MalformedDictionary(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_categories_in_document_order() {
        let dict = Dictionary::from_value(&json!({
            "categories": {
                "zeta": { "Z": { "en": "last letter", "keywords": ["zed"] } },
                "alpha": {
                    "B": { "en": "bee", "zh": "蜜蜂" },
                    "A": { "en": "ay", "keywords": ["ay", "first"] }
                }
            },
            "sequences": { "canonical": [] }
        }))
        .unwrap();

        let names: Vec<&str> = dict.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        let glyphs: Vec<&str> = dict.categories[1].glyphs.iter().map(|g| g.glyph.as_str()).collect();
        assert_eq!(glyphs, vec!["B", "A"]);
        assert_eq!(dict.glyph_count(), 3);
    }

    #[test]
    fn test_missing_keywords_are_empty() {
        let dict = Dictionary::from_value(&json!({
            "categories": { "c": { "X": { "en": "ex", "zh": "叉", "keywords": null }, "Y": { "en": "why" } } },
            "sequences": { "canonical": [] }
        }))
        .unwrap();
        assert!(dict.categories[0].glyphs.iter().all(|g| g.keywords.is_empty()));
        assert_eq!(dict.categories[0].glyphs[0].glosses.get("zh").map(String::as_str), Some("叉"));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let dict = Dictionary::from_json_str(r#"{"categories": {}, "sequences": {"canonical": []}}"#).unwrap();
        assert_eq!(dict, Dictionary::empty());
    }

    #[test]
    fn test_canonical_metadata_is_preserved() {
        let dict = Dictionary::from_value(&json!({
            "categories": {},
            "sequences": { "canonical": [ { "sequence": "AB", "name": "greeting", "en": "hello there" } ] }
        }))
        .unwrap();
        let seq = &dict.canonical[0];
        assert_eq!(seq.sequence, "AB");
        assert_eq!(seq.metadata.get("name"), Some(&json!("greeting")));
        assert!(seq.metadata.get("sequence").is_none());
    }

    #[test]
    fn test_partial_field_is_not_metadata() {
        let dict = Dictionary::from_value(&json!({
            "categories": {},
            "sequences": { "canonical": [ { "sequence": "AB", "partial": true, "name": "pair" } ] }
        }))
        .unwrap();
        let seq = &dict.canonical[0];
        assert!(seq.metadata.get("partial").is_none());
        assert_eq!(seq.metadata.get("name"), Some(&json!("pair")));
    }

    #[test]
    fn test_structural_errors_fail_fast() {
        let cases = vec![
            json!([]),
            json!({ "sequences": { "canonical": [] } }),
            json!({ "categories": [], "sequences": { "canonical": [] } }),
            json!({ "categories": { "c": "oops" }, "sequences": { "canonical": [] } }),
            json!({ "categories": {}, "sequences": { "canonical": {} } }),
            json!({ "categories": {}, "sequences": { "canonical": [ { "name": "no sequence" } ] } }),
            json!({ "categories": { "c": { "": { "en": "nothing" } } }, "sequences": { "canonical": [] } }),
            json!({ "categories": { "c": { "X": { "keywords": "x" } } }, "sequences": { "canonical": [] } }),
        ];
        for case in cases {
            let err = Dictionary::from_value(&case).unwrap_err();
            assert!(matches!(err, GlyphError::MalformedDictionary(_)), "{}", case);
        }
    }

    #[test]
    fn test_invalid_json_is_a_json_error() {
        let err = Dictionary::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GlyphError::Json(_)));
    }
}
