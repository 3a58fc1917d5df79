//! Graph Builder
//!
//! Merges parsed entries into a deduplicated node set and one direct edge per
//! unordered pair. Construction runs in discrete passes over frozen input:
//!
//! 1. seed one node per character
//! 2. resolve every entry to a target node, synthesizing external nodes
//! 3. record who declares a relationship with whom
//! 4. create edges, first declaration wins
//! 5. tag mutual declarations as bidirectional

use std::collections::HashSet;

use indexmap::IndexMap;

use super::parser::ParsedCharacter;
use super::types::{GraphEdge, GraphNode, PairKey, RelationshipEntry, RelationshipRow};

/// Prefix of synthesized node ids.
pub const EXTERNAL_ID_PREFIX: &str = "external:";

/// Nodes, direct edges and declared rows, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DirectGraph {
    pub nodes: IndexMap<String, GraphNode>,
    pub edges: IndexMap<PairKey, GraphEdge>,
    pub relationships: Vec<RelationshipRow>,
}

/// An entry whose target has been resolved to a node id.
struct ResolvedEntry<'a> {
    source_id: &'a str,
    target_id: String,
    entry: &'a RelationshipEntry,
}

/// Lower-case and collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Deterministic id for an external target.
pub fn external_node_id(target_name: &str) -> String {
    format!("{}{}", EXTERNAL_ID_PREFIX, normalize_name(target_name))
}

/// Build the node set and direct edge set.
pub fn build_graph(parsed: &[ParsedCharacter<'_>]) -> DirectGraph {
    let mut graph = DirectGraph::default();

    // Pass 1: seed characters; a repeated id drops the whole later record
    let mut seeded: Vec<&ParsedCharacter<'_>> = Vec::with_capacity(parsed.len());
    for pc in parsed {
        let id = &pc.character.id;
        if graph.nodes.contains_key(id) {
            log::warn!("Duplicate character id {}; keeping the first record", id);
            continue;
        }
        graph
            .nodes
            .insert(id.clone(), GraphNode::character(pc.character));
        seeded.push(pc);
    }

    // Pass 2: resolve targets
    let mut resolved: Vec<ResolvedEntry<'_>> = Vec::new();
    for pc in seeded {
        let source_id = pc.character.id.as_str();
        for entry in &pc.entries {
            let target_id = resolve_target(&mut graph.nodes, entry);

            if target_id == source_id {
                log::trace!("Skipping self-reference on {}", source_id);
                continue;
            }

            if let Some(target) = graph.nodes.get_mut(&target_id) {
                if target.image_url.is_none() {
                    target.image_url = entry.target_image_url.clone();
                }
                graph
                    .relationships
                    .push(RelationshipRow::declared(pc.character, target, entry));
            }

            resolved.push(ResolvedEntry {
                source_id,
                target_id,
                entry,
            });
        }
    }

    // Pass 3: mutuality lookup
    let declared: HashSet<(&str, &str)> = resolved
        .iter()
        .map(|r| (r.source_id, r.target_id.as_str()))
        .collect();

    // Pass 4: one edge per pair, first declaration wins
    for r in &resolved {
        graph
            .edges
            .entry(PairKey::new(r.source_id, &r.target_id))
            .or_insert_with(|| GraphEdge::direct(r.source_id, &r.target_id, r.entry));
    }

    // Pass 5: bidirectional tagging
    for edge in graph.edges.values_mut() {
        edge.is_bidirectional = declared.contains(&(edge.from.as_str(), edge.to.as_str()))
            && declared.contains(&(edge.to.as_str(), edge.from.as_str()));
    }

    log::debug!(
        "Built relationship graph: {} nodes, {} direct edges from {} entries",
        graph.nodes.len(),
        graph.edges.len(),
        resolved.len()
    );

    graph
}

/// Resolve an entry to a node id, creating the external node when needed.
///
/// A `target_character_id` that names no seeded character is ignored and the
/// entry falls back to its name.
fn resolve_target(nodes: &mut IndexMap<String, GraphNode>, entry: &RelationshipEntry) -> String {
    if let Some(id) = entry.target_character_id.as_deref() {
        match nodes.get(id) {
            Some(node) if !node.is_external => return id.to_string(),
            _ => log::debug!(
                "Character id {} for '{}' not found; treating as external",
                id,
                entry.target_name
            ),
        }
    }

    let id = external_node_id(&entry.target_name);
    nodes
        .entry(id.clone())
        .or_insert_with(|| GraphNode::external(id.clone(), entry.target_name.trim()));
    id
}
