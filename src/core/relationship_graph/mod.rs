//! Character Relationship Graph
//!
//! Turns per-character relationship lists into a deduplicated graph, infers
//! two-hop relationships and lays the graph out for rendering.
//!
//! ```text
//!  characters ─▶ parser ─▶ builder ─▶ inference ─▶ layout ─▶ RelationshipGraph
//!                              │                                 ▲
//!                              └──── declared rows ──────────────┘
//! ```
//!
//! Everything here is synchronous and side-effect free. Callers that re-render
//! often should memoize through [`GraphCache`].

pub mod analysis;
pub mod builder;
pub mod cache;
pub mod colors;
pub mod engine;
pub mod error;
pub mod inference;
pub mod layout;
pub mod parser;
pub mod types;

// Re-exports for convenience
pub use analysis::{ego_graph, GraphStats};
pub use builder::{build_graph, external_node_id, normalize_name, DirectGraph};
pub use cache::{content_key, CacheConfig, CacheStats, GraphCache};
pub use colors::{ColorResolver, DefaultPalette, PaletteConfig};
pub use engine::{compute_relationship_graph, RelationshipGraphEngine};
pub use error::{LayoutError, ParseError};
pub use inference::infer_indirect;
pub use layout::{compute_layout, Layout, LayoutConfig, Point};
pub use parser::{parse_all, parse_character, parse_field, ParsedCharacter};
pub use types::{
    Character, GraphEdge, GraphNode, PairKey, PositionedNode, RelationshipCategory,
    RelationshipEntry, RelationshipGraph, RelationshipRow, RenderedEdge, Viewport,
};
