//! Indirect Relationship Inference
//!
//! Surfaces "friend-of-a-friend" connections: for every character `X` and
//! every neighbor `I`, each neighbor `Y` of `I` that is a known character and
//! not already adjacent to `X` yields an inferred edge `X -> Y` via `I`.
//!
//! Only two hops are considered. When several intermediaries connect the same
//! pair, the one with the lexicographically smallest node id supplies the
//! relationship type and category, so attribution does not depend on edge
//! insertion order.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use super::types::{GraphEdge, GraphNode, PairKey};

/// Undirected adjacency over direct edges, neighbors in edge order.
fn adjacency(edges: &IndexMap<PairKey, GraphEdge>) -> HashMap<&str, IndexSet<&str>> {
    let mut adjacency: HashMap<&str, IndexSet<&str>> = HashMap::new();
    for edge in edges.values() {
        adjacency
            .entry(edge.from.as_str())
            .or_default()
            .insert(edge.to.as_str());
        adjacency
            .entry(edge.to.as_str())
            .or_default()
            .insert(edge.from.as_str());
    }
    adjacency
}

/// Infer two-hop edges. Direct edges are never duplicated or modified.
pub fn infer_indirect(
    nodes: &IndexMap<String, GraphNode>,
    edges: &IndexMap<PairKey, GraphEdge>,
) -> Vec<GraphEdge> {
    let adjacency = adjacency(edges);
    let is_character = |id: &str| nodes.get(id).is_some_and(|n| !n.is_external);

    let mut inferred: IndexMap<PairKey, GraphEdge> = IndexMap::new();

    for x in nodes.values().filter(|n| !n.is_external) {
        let x = x.id.as_str();
        let Some(direct) = adjacency.get(x) else {
            continue;
        };

        // Y -> chosen intermediary
        let mut candidates: IndexMap<&str, &str> = IndexMap::new();
        for &via in direct {
            let Some(second_hop) = adjacency.get(via) else {
                continue;
            };
            for &y in second_hop {
                if y == x || direct.contains(y) || !is_character(y) {
                    continue;
                }
                candidates
                    .entry(y)
                    .and_modify(|best| {
                        if via < *best {
                            *best = via;
                        }
                    })
                    .or_insert(via);
            }
        }

        for (y, via) in candidates {
            let key = PairKey::new(x, y);
            if edges.contains_key(&key) || inferred.contains_key(&key) {
                continue;
            }
            let Some(source) = edges.get(&PairKey::new(via, y)) else {
                continue;
            };
            inferred.insert(key, GraphEdge::indirect(x, y, via, source));
        }
    }

    log::debug!("Inferred {} indirect relationships", inferred.len());

    inferred.into_values().collect()
}
