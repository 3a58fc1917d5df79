//! Relationship Graph Types
//!
//! Input character records, parsed relationship entries, and the node/edge
//! shapes handed to the rendering layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Relationship Categories
// ============================================================================

/// The five relationship fields a character record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipCategory {
    Family,
    FriendsAllies,
    RivalsEnemies,
    Romantic,
    Other,
}

impl RelationshipCategory {
    /// All categories, in the order fields are parsed.
    pub const ALL: [Self; 5] = [
        Self::Family,
        Self::FriendsAllies,
        Self::RivalsEnemies,
        Self::Romantic,
        Self::Other,
    ];

    /// Name of the character record field holding this category.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::FriendsAllies => "friends_allies",
            Self::RivalsEnemies => "rivals_enemies",
            Self::Romantic => "romantic",
            Self::Other => "other_relationships",
        }
    }
}

impl fmt::Display for RelationshipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Family => write!(f, "Family"),
            Self::FriendsAllies => write!(f, "Friends & Allies"),
            Self::RivalsEnemies => write!(f, "Rivals & Enemies"),
            Self::Romantic => write!(f, "Romantic"),
            Self::Other => write!(f, "Other"),
        }
    }
}

// ============================================================================
// Input Records
// ============================================================================

/// A user-authored character as delivered by the persistence layer.
///
/// The relationship fields are kept as raw JSON: each is either an array of
/// entry objects or a string holding a serialized array. Decoding happens in
/// the parser so a bad field never rejects the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub family: Option<Value>,
    #[serde(default)]
    pub friends_allies: Option<Value>,
    #[serde(default)]
    pub rivals_enemies: Option<Value>,
    #[serde(default)]
    pub romantic: Option<Value>,
    #[serde(default)]
    pub other_relationships: Option<Value>,
}

impl Character {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Builder: set slug
    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.to_string());
        self
    }

    /// Builder: set portrait image
    pub fn with_image(mut self, image_url: &str) -> Self {
        self.image_url = Some(image_url.to_string());
        self
    }

    /// Builder: set the raw value of one relationship field
    pub fn with_field(mut self, category: RelationshipCategory, raw: Value) -> Self {
        *self.field_mut(category) = Some(raw);
        self
    }

    /// Raw value of one relationship field.
    pub fn field(&self, category: RelationshipCategory) -> Option<&Value> {
        match category {
            RelationshipCategory::Family => self.family.as_ref(),
            RelationshipCategory::FriendsAllies => self.friends_allies.as_ref(),
            RelationshipCategory::RivalsEnemies => self.rivals_enemies.as_ref(),
            RelationshipCategory::Romantic => self.romantic.as_ref(),
            RelationshipCategory::Other => self.other_relationships.as_ref(),
        }
    }

    fn field_mut(&mut self, category: RelationshipCategory) -> &mut Option<Value> {
        match category {
            RelationshipCategory::Family => &mut self.family,
            RelationshipCategory::FriendsAllies => &mut self.friends_allies,
            RelationshipCategory::RivalsEnemies => &mut self.rivals_enemies,
            RelationshipCategory::Romantic => &mut self.romantic,
            RelationshipCategory::Other => &mut self.other_relationships,
        }
    }
}

/// One declared connection from a character to a named target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEntry {
    /// Field the entry was declared under
    pub category: RelationshipCategory,
    /// Name of the target as written by the author
    pub target_name: String,
    /// Linked character record, possibly dangling
    pub target_character_id: Option<String>,
    /// Free-text caption, never interpreted
    pub label: Option<String>,
    /// Opaque type key used for colors and icons
    pub relationship_type: Option<String>,
    pub target_image_url: Option<String>,
}

// ============================================================================
// Graph Types
// ============================================================================

/// Canonical unordered pair of node ids.
///
/// `(a, b)` and `(b, a)` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// A node in the relationship graph, before layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Character id, or `external:<normalized name>` for synthesized nodes
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// True when the node does not resolve to a known character
    pub is_external: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GraphNode {
    /// Node for a known character record
    pub fn character(character: &Character) -> Self {
        Self {
            id: character.id.clone(),
            name: character.name.clone(),
            slug: character.slug.clone(),
            is_external: false,
            image_url: character
                .image_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// Synthesized node for a target that is not a known character
    pub fn external(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            slug: None,
            is_external: true,
            image_url: None,
        }
    }
}

/// A node with its layout coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: GraphNode,
    pub x: f64,
    pub y: f64,
}

/// An edge between two nodes.
///
/// `from`/`to` keep the direction of the first declaration; identity is the
/// unordered pair returned by [`GraphEdge::key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub category: RelationshipCategory,
    /// Caption of the first declaration; always absent on indirect edges
    #[serde(rename = "relationship", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    pub is_bidirectional: bool,
    pub is_indirect: bool,
    /// Intermediary node of an indirect edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl GraphEdge {
    /// Direct edge from the first declaration seen for a pair
    pub fn direct(from: &str, to: &str, entry: &RelationshipEntry) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            category: entry.category,
            label: entry.label.clone(),
            relationship_type: entry.relationship_type.clone(),
            is_bidirectional: false,
            is_indirect: false,
            via: None,
        }
    }

    /// Inferred two-hop edge `from -> via -> to`, attributed from the direct
    /// edge between `via` and `to`.
    pub fn indirect(from: &str, to: &str, via: &str, source: &GraphEdge) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            category: source.category,
            label: None,
            relationship_type: source.relationship_type.clone(),
            is_bidirectional: false,
            is_indirect: true,
            via: Some(via.to_string()),
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(&self.from, &self.to)
    }

    /// Check if the edge touches a node
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

/// An edge with the color the renderer should draw it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEdge {
    #[serde(flatten)]
    pub edge: GraphEdge,
    pub color: String,
}

/// One row of the flat relationship list used by list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRow {
    pub source_id: String,
    pub source_name: String,
    /// Node id of the target (character or external)
    pub target_id: String,
    pub target_name: String,
    pub category: RelationshipCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_image_url: Option<String>,
    pub is_external: bool,
    pub is_indirect: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl RelationshipRow {
    /// Row for a declared entry
    pub fn declared(source: &Character, target: &GraphNode, entry: &RelationshipEntry) -> Self {
        Self {
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            target_id: target.id.clone(),
            target_name: entry.target_name.clone(),
            category: entry.category,
            relationship: entry.label.clone(),
            relationship_type: entry.relationship_type.clone(),
            target_image_url: entry.target_image_url.clone(),
            is_external: target.is_external,
            is_indirect: false,
            via: None,
        }
    }

    /// Row for an inferred edge
    pub fn inferred(edge: &GraphEdge, source: &GraphNode, target: &GraphNode) -> Self {
        Self {
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            target_id: target.id.clone(),
            target_name: target.name.clone(),
            category: edge.category,
            relationship: None,
            relationship_type: edge.relationship_type.clone(),
            target_image_url: target.image_url.clone(),
            is_external: target.is_external,
            is_indirect: true,
            via: edge.via.clone(),
        }
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Bounding rectangle of the laid-out graph, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Bounding box of `points` grown by `padding` on every side.
    ///
    /// Returns `None` for an empty point set.
    pub fn enclosing<I>(points: I, padding: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points = points.into_iter();
        let (x0, y0) = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self {
            min_x: min_x - padding,
            min_y: min_y - padding,
            width: (max_x - min_x) + padding * 2.0,
            height: (max_y - min_y) + padding * 2.0,
        })
    }

    /// SVG `viewBox` attribute value
    pub fn view_box(&self) -> String {
        self.to_string()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x
            && x <= self.min_x + self.width
            && y >= self.min_y
            && y <= self.min_y + self.height
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

// ============================================================================
// Engine Output
// ============================================================================

/// Complete relationship graph handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<RenderedEdge>,
    /// Flat list of declared and inferred relationships
    pub relationships: Vec<RelationshipRow>,
    pub viewport: Viewport,
}

impl RelationshipGraph {
    /// Graph with no nodes framed by `viewport`
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            nodes: vec![],
            edges: vec![],
            relationships: vec![],
            viewport,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by id
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }

    /// Find the edge between two nodes, in either direction
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&RenderedEdge> {
        let key = PairKey::new(a, b);
        self.edges.iter().find(|e| e.edge.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pair_key_is_unordered() {
        assert_eq!(PairKey::new("a", "b"), PairKey::new("b", "a"));
        assert_eq!(PairKey::new("b", "a").first(), "a");
        assert_eq!(PairKey::new("b", "a").second(), "b");
    }

    #[test]
    fn test_viewport_enclosing_adds_padding() {
        let vp = Viewport::enclosing(vec![(10.0, 20.0), (110.0, 70.0)], 5.0).unwrap();
        assert_eq!(vp, Viewport::new(5.0, 15.0, 110.0, 60.0));
        assert_eq!(vp.view_box(), "5 15 110 60");
        assert!(Viewport::enclosing(Vec::new(), 5.0).is_none());
    }

    #[test]
    fn test_character_deserializes_with_missing_fields() {
        let character: Character = serde_json::from_value(json!({
            "id": "oc-1",
            "name": "Mira",
            "family": null,
            "romantic": "[]"
        }))
        .unwrap();

        assert!(character.family.is_none());
        assert_eq!(
            character.field(RelationshipCategory::Romantic),
            Some(&json!("[]"))
        );
        assert!(character.slug.is_none());
    }

    #[test]
    fn test_edge_serializes_label_as_relationship() {
        let entry = RelationshipEntry {
            category: RelationshipCategory::FriendsAllies,
            target_name: "Bo".to_string(),
            target_character_id: None,
            label: Some("childhood friend".to_string()),
            relationship_type: Some("friend".to_string()),
            target_image_url: None,
        };
        let edge = GraphEdge::direct("a", "b", &entry);
        let value = serde_json::to_value(&edge).unwrap();

        assert_eq!(value["relationship"], "childhood friend");
        assert_eq!(value["category"], "friends_allies");
        assert!(value.get("via").is_none());
    }
}
