//! Edge Colors
//!
//! The renderer wants a color per edge. The lookup itself belongs to the host
//! application, so the engine only asks a [`ColorResolver`]. [`DefaultPalette`]
//! covers the common case: exact `relationship_type` overrides first, then a
//! muted color for inferred edges, then one color per category.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{GraphEdge, RelationshipCategory};

/// Resolves the display color of an edge.
pub trait ColorResolver: Send + Sync {
    fn edge_color(&self, edge: &GraphEdge) -> String;
}

impl<F> ColorResolver for F
where
    F: Fn(&GraphEdge) -> String + Send + Sync,
{
    fn edge_color(&self, edge: &GraphEdge) -> String {
        self(edge)
    }
}

// ============================================================================
// Palette Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub family: String,
    pub friends_allies: String,
    pub rivals_enemies: String,
    pub romantic: String,
    pub other: String,
    /// Color for inferred edges without a type override
    pub indirect: String,
    /// Exact `relationship_type` -> color overrides
    pub type_colors: IndexMap<String, String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            family: "#8b5cf6".to_string(),         // purple
            friends_allies: "#22c55e".to_string(), // green
            rivals_enemies: "#ef4444".to_string(), // red
            romantic: "#ec4899".to_string(),       // pink
            other: "#6b7280".to_string(),          // gray
            indirect: "#9ca3af".to_string(),       // light gray
            type_colors: IndexMap::new(),
        }
    }
}

impl PaletteConfig {
    pub fn category_color(&self, category: RelationshipCategory) -> &str {
        match category {
            RelationshipCategory::Family => &self.family,
            RelationshipCategory::FriendsAllies => &self.friends_allies,
            RelationshipCategory::RivalsEnemies => &self.rivals_enemies,
            RelationshipCategory::Romantic => &self.romantic,
            RelationshipCategory::Other => &self.other,
        }
    }
}

// ============================================================================
// Default Palette
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DefaultPalette {
    config: PaletteConfig,
}

impl DefaultPalette {
    pub fn new(config: PaletteConfig) -> Self {
        Self { config }
    }

    /// Builder: add a color for one relationship type
    pub fn with_type_color(mut self, relationship_type: &str, color: &str) -> Self {
        self.config
            .type_colors
            .insert(relationship_type.to_string(), color.to_string());
        self
    }
}

impl ColorResolver for DefaultPalette {
    fn edge_color(&self, edge: &GraphEdge) -> String {
        if let Some(color) = edge
            .relationship_type
            .as_ref()
            .and_then(|t| self.config.type_colors.get(t))
        {
            return color.clone();
        }
        if edge.is_indirect {
            return self.config.indirect.clone();
        }
        self.config.category_color(edge.category).to_string()
    }
}
