//! Test Fixtures
//!
//! Small casts of characters with hand-written relationship fields.

use serde_json::{json, Value};

use crate::core::relationship_graph::{Character, RelationshipCategory};

// =============================================================================
// Entry Builders
// =============================================================================

/// Relationship entry pointing at another character by id.
pub fn linked_entry(name: &str, oc_id: &str) -> Value {
    json!({ "name": name, "oc_id": oc_id })
}

/// Relationship entry for someone who is not a character.
pub fn external_entry(name: &str) -> Value {
    json!({ "name": name })
}

// =============================================================================
// Casts
// =============================================================================

/// A calls B a friend, B calls C a rival. Inference should link A and C.
pub fn create_chain_cast() -> Vec<Character> {
    vec![
        Character::new("a", "Aldric").with_field(
            RelationshipCategory::FriendsAllies,
            json!([{ "name": "Brynn", "oc_id": "b", "relationship_type": "friend" }]),
        ),
        Character::new("b", "Brynn").with_field(
            RelationshipCategory::RivalsEnemies,
            json!([{ "name": "Corvin", "oc_id": "c", "relationship_type": "rival" }]),
        ),
        Character::new("c", "Corvin"),
    ]
}

/// Two siblings who list each other.
pub fn create_mutual_pair() -> Vec<Character> {
    vec![
        Character::new("m1", "Mira")
            .with_field(RelationshipCategory::Family, json!([linked_entry("Nell", "m2")])),
        Character::new("m2", "Nell")
            .with_field(RelationshipCategory::Family, json!([linked_entry("Mira", "m1")])),
    ]
}

/// A hub character linked to `spokes` others, none of which link back.
pub fn create_star_cast(spokes: usize) -> Vec<Character> {
    let entries: Vec<Value> = (0..spokes)
        .map(|i| linked_entry(&format!("Spoke {i}"), &format!("s{i}")))
        .collect();

    let mut cast = vec![Character::new("hub", "Hub")
        .with_field(RelationshipCategory::FriendsAllies, Value::Array(entries))];
    cast.extend((0..spokes).map(|i| Character::new(&format!("s{i}"), &format!("Spoke {i}"))));
    cast
}
