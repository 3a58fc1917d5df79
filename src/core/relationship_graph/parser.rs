//! Relationship Parser
//!
//! Decodes the five raw relationship fields of a character into typed
//! [`RelationshipEntry`] values. Parsing is fail-soft: a field that is not an
//! array is treated as empty, and each array element is decoded on its own
//! so one bad element never costs the character its other relationships.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::{ParseError, Result};
use super::types::{Character, RelationshipCategory, RelationshipEntry};

/// A character paired with the entries parsed from its fields.
#[derive(Debug, Clone)]
pub struct ParsedCharacter<'a> {
    pub character: &'a Character,
    pub entries: Vec<RelationshipEntry>,
}

/// Wire shape of one relationship element.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    oc_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    relationship: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    relationship_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    image_url: Option<String>,
}

/// Accepts strings and numbers; blank strings and null become `None`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(non_blank(&s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            json_kind(&other)
        ))),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Entry Decoding
// ============================================================================

/// Decode a single array element.
pub fn parse_entry(value: &Value, category: RelationshipCategory) -> Result<RelationshipEntry> {
    if !value.is_object() {
        return Err(ParseError::EntryNotAnObject(json_kind(value)));
    }

    let raw = RawEntry::deserialize(value).map_err(ParseError::MalformedEntry)?;
    let target_name = raw.name.ok_or(ParseError::MissingName)?;

    Ok(RelationshipEntry {
        category,
        target_name,
        target_character_id: raw.oc_id,
        label: raw.relationship,
        relationship_type: raw.relationship_type,
        target_image_url: raw.image_url,
    })
}

// ============================================================================
// Field Decoding
// ============================================================================

/// Decode one relationship field, reporting field-level failures.
///
/// Element-level failures are logged and the element dropped; they never
/// fail the field.
pub fn try_parse_field(
    raw: Option<&Value>,
    category: RelationshipCategory,
) -> Result<Vec<RelationshipEntry>> {
    let decoded;
    let items: &[Value] = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            decoded = serde_json::from_str::<Value>(text).map_err(ParseError::InvalidJson)?;
            match &decoded {
                Value::Null => return Ok(Vec::new()),
                Value::Array(items) => items,
                other => return Err(ParseError::NotAnArray(json_kind(other))),
            }
        }
        Some(other) => return Err(ParseError::NotAnArray(json_kind(other))),
    };

    let entries = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match parse_entry(item, category) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!(
                    "Dropping {} entry #{}: {}",
                    category.field_name(),
                    index,
                    e
                );
                None
            }
        })
        .collect();

    Ok(entries)
}

/// Decode one relationship field; malformed fields yield no entries.
pub fn parse_field(raw: Option<&Value>, category: RelationshipCategory) -> Vec<RelationshipEntry> {
    try_parse_field(raw, category).unwrap_or_else(|e| {
        log::warn!("Discarding {} field: {}", category.field_name(), e);
        Vec::new()
    })
}

// ============================================================================
// Character Decoding
// ============================================================================

/// Decode all five fields of a character, in category order.
pub fn parse_character(character: &Character) -> Vec<RelationshipEntry> {
    RelationshipCategory::ALL
        .iter()
        .flat_map(|&category| match try_parse_field(character.field(category), category) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Discarding {} of character {}: {}",
                    category.field_name(),
                    character.id,
                    e
                );
                Vec::new()
            }
        })
        .collect()
}

/// Decode every character in input order.
pub fn parse_all(characters: &[Character]) -> Vec<ParsedCharacter<'_>> {
    characters
        .iter()
        .map(|character| ParsedCharacter {
            character,
            entries: parse_character(character),
        })
        .collect()
}
