//! Graph Analysis
//!
//! Read-only queries over a computed [`RelationshipGraph`]: summary statistics
//! and ego subgraphs centered on one node.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::layout::LayoutConfig;
use super::types::{RelationshipCategory, RelationshipGraph, Viewport};

/// Number of entries reported in `most_connected`.
const MOST_CONNECTED_LIMIT: usize = 5;

/// Statistics about a relationship graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub character_count: usize,
    pub external_count: usize,
    pub edge_count: usize,
    pub direct_edge_count: usize,
    pub indirect_edge_count: usize,
    pub bidirectional_edge_count: usize,
    /// Edges per category, in category order; categories without edges are omitted
    pub category_counts: IndexMap<RelationshipCategory, usize>,
    /// Display name and degree of the best connected nodes
    pub most_connected: Vec<(String, usize)>,
}

impl GraphStats {
    pub fn from_graph(graph: &RelationshipGraph) -> Self {
        let mut stats = Self {
            node_count: graph.nodes.len(),
            edge_count: graph.edges.len(),
            ..Default::default()
        };

        for n in &graph.nodes {
            if n.node.is_external {
                stats.external_count += 1;
            } else {
                stats.character_count += 1;
            }
        }

        let mut degree: HashMap<&str, usize> = HashMap::new();
        let mut per_category: HashMap<RelationshipCategory, usize> = HashMap::new();
        for e in &graph.edges {
            let edge = &e.edge;
            if edge.is_indirect {
                stats.indirect_edge_count += 1;
            } else {
                stats.direct_edge_count += 1;
            }
            if edge.is_bidirectional {
                stats.bidirectional_edge_count += 1;
            }
            *per_category.entry(edge.category).or_insert(0) += 1;
            *degree.entry(edge.from.as_str()).or_insert(0) += 1;
            *degree.entry(edge.to.as_str()).or_insert(0) += 1;
        }

        stats.category_counts = RelationshipCategory::ALL
            .iter()
            .filter_map(|c| per_category.get(c).map(|&count| (*c, count)))
            .collect();

        // Stable sort keeps node order among equal degrees
        let mut ranked: Vec<(String, usize)> = graph
            .nodes
            .iter()
            .filter_map(|n| {
                let count = *degree.get(n.node.id.as_str())?;
                Some((n.node.name.clone(), count))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MOST_CONNECTED_LIMIT);
        stats.most_connected = ranked;

        stats
    }
}

/// Subgraph of nodes within `depth` hops of `node_id`.
///
/// Edges of any kind (direct or inferred) count as hops. Coordinates are kept;
/// the viewport is recomputed around the surviving nodes with the padding of
/// `config`. Depth 0 or an unknown node yields an empty graph.
pub fn ego_graph(
    graph: &RelationshipGraph,
    node_id: &str,
    depth: usize,
    config: &LayoutConfig,
) -> RelationshipGraph {
    if depth == 0 || graph.node(node_id).is_none() {
        return RelationshipGraph::empty(config.default_viewport());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut frontier: HashSet<&str> = HashSet::new();
    visited.insert(node_id);
    frontier.insert(node_id);

    for _ in 0..depth {
        let mut next: HashSet<&str> = HashSet::new();
        for e in &graph.edges {
            let (from, to) = (e.edge.from.as_str(), e.edge.to.as_str());
            if frontier.contains(from) && !visited.contains(to) {
                next.insert(to);
            }
            if frontier.contains(to) && !visited.contains(from) {
                next.insert(from);
            }
        }
        if next.is_empty() {
            break;
        }
        visited.extend(next.iter().copied());
        frontier = next;
    }

    let nodes: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| visited.contains(n.node.id.as_str()))
        .cloned()
        .collect();
    let edges = graph
        .edges
        .iter()
        .filter(|e| {
            visited.contains(e.edge.from.as_str()) && visited.contains(e.edge.to.as_str())
        })
        .cloned()
        .collect();
    let relationships = graph
        .relationships
        .iter()
        .filter(|r| {
            visited.contains(r.source_id.as_str()) && visited.contains(r.target_id.as_str())
        })
        .cloned()
        .collect();

    let viewport = Viewport::enclosing(nodes.iter().map(|n| (n.x, n.y)), config.padding)
        .unwrap_or_else(|| config.default_viewport());

    RelationshipGraph {
        nodes,
        edges,
        relationships,
        viewport,
    }
}
