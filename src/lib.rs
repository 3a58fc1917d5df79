/// OC Relationship Graph
///
/// Turns original-character records with free-form relationship lists into a
/// deduplicated, laid-out relationship graph ready for rendering.

pub mod config;
pub mod core;

pub use crate::config::GraphConfig;
pub use crate::core::relationship_graph::{
    compute_relationship_graph, ego_graph, CacheConfig, Character, GraphCache, GraphEdge,
    GraphNode, GraphStats, LayoutConfig, PaletteConfig, PositionedNode, RelationshipCategory,
    RelationshipGraph, RelationshipGraphEngine, RelationshipRow, RenderedEdge, Viewport,
};

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
