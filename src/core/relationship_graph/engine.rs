//! Relationship Graph Engine
//!
//! Runs the full pipeline as a pure function of the character list:
//! parse -> build -> infer -> layout -> color.

use super::builder::{build_graph, DirectGraph};
use super::colors::{ColorResolver, DefaultPalette};
use super::inference::infer_indirect;
use super::layout::{compute_layout, LayoutConfig};
use super::parser::parse_all;
use super::types::{
    Character, GraphEdge, GraphNode, PositionedNode, RelationshipGraph, RelationshipRow,
    RenderedEdge,
};
use crate::config::GraphConfig;

/// Stateless graph computation with fixed layout constants and palette.
pub struct RelationshipGraphEngine {
    layout: LayoutConfig,
    colors: Box<dyn ColorResolver>,
}

impl Default for RelationshipGraphEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl std::fmt::Debug for RelationshipGraphEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationshipGraphEngine")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl RelationshipGraphEngine {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            colors: Box::new(DefaultPalette::default()),
        }
    }

    /// Engine using the layout and palette sections of `config`.
    ///
    /// An invalid layout section is replaced by the defaults.
    pub fn from_config(config: &GraphConfig) -> Self {
        let layout = match config.layout.validate() {
            Ok(()) => config.layout.clone(),
            Err(reason) => {
                log::warn!("Invalid layout config ({}); using defaults", reason);
                LayoutConfig::default()
            }
        };
        Self {
            layout,
            colors: Box::new(DefaultPalette::new(config.palette.clone())),
        }
    }

    /// Builder: replace the edge color lookup
    pub fn with_colors(mut self, colors: impl ColorResolver + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Compute the graph for `characters`.
    ///
    /// Never fails: malformed relationship data is dropped and an empty input
    /// yields an empty graph framed by the default viewport.
    pub fn compute(&self, characters: &[Character]) -> RelationshipGraph {
        let _span =
            tracing::debug_span!("relationship_graph", characters = characters.len()).entered();

        if characters.is_empty() {
            return RelationshipGraph::empty(self.layout.default_viewport());
        }

        let parsed = parse_all(characters);
        let DirectGraph {
            nodes,
            edges,
            mut relationships,
        } = build_graph(&parsed);
        let inferred = infer_indirect(&nodes, &edges);

        relationships.extend(inferred.iter().filter_map(|edge| {
            Some(RelationshipRow::inferred(
                edge,
                nodes.get(&edge.from)?,
                nodes.get(&edge.to)?,
            ))
        }));

        let nodes: Vec<GraphNode> = nodes.into_values().collect();
        let edges: Vec<GraphEdge> = edges.into_values().chain(inferred).collect();
        let layout = compute_layout(&nodes, &edges, &self.layout);

        let nodes = nodes
            .into_iter()
            .zip(layout.positions)
            .map(|(node, p)| PositionedNode {
                node,
                x: p.x,
                y: p.y,
            })
            .collect();
        let edges = edges
            .into_iter()
            .map(|edge| RenderedEdge {
                color: self.colors.edge_color(&edge),
                edge,
            })
            .collect();

        RelationshipGraph {
            nodes,
            edges,
            relationships,
            viewport: layout.viewport,
        }
    }
}

/// Compute a graph with the default layout constants and palette.
pub fn compute_relationship_graph(characters: &[Character]) -> RelationshipGraph {
    RelationshipGraphEngine::default().compute(characters)
}
