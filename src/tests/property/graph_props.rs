//! Property-based tests for the relationship graph pipeline
//!
//! Tests invariants:
//! - Every edge endpoint is a node, no self-loops
//! - At most one edge per unordered pair
//! - Bidirectional flag matches declarations in both directions
//! - Inferred edges never shadow direct edges and always have a via node
//! - Case and whitespace variants of a name give one external node
//! - Deterministic given the same input
//! - Every node lies inside the viewport

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::core::relationship_graph::{
    compute_relationship_graph, external_node_id, Character, PairKey, RelationshipCategory,
    RelationshipGraph,
};
use crate::tests::common::{
    create_chain_cast, create_mutual_pair, create_star_cast, external_entry, linked_entry,
};

const MAX_CHARACTERS: usize = 6;

const EXTERNAL_NAMES: &[&str] = &["Jane Doe", "Old Tom", "The Warden", "Sister Ash"];

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_category() -> impl Strategy<Value = RelationshipCategory> {
    prop_oneof![
        Just(RelationshipCategory::Family),
        Just(RelationshipCategory::FriendsAllies),
        Just(RelationshipCategory::RivalsEnemies),
        Just(RelationshipCategory::Romantic),
        Just(RelationshipCategory::Other),
    ]
}

/// Re-case and re-space a name without changing its normalized form
fn arb_name_variant(name: &'static str) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(any::<bool>(), name.len()),
        0usize..3,
        0usize..3,
        1usize..4,
    )
        .prop_map(move |(upper, lead, trail, gap)| {
            let cased: String = name
                .chars()
                .zip(upper)
                .map(|(c, up)| {
                    if up {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();
            let spaced = cased
                .split(' ')
                .collect::<Vec<_>>()
                .join(&" ".repeat(gap));
            format!("{}{}{}", " ".repeat(lead), spaced, "\t".repeat(trail))
        })
}

fn arb_external_name() -> impl Strategy<Value = String> {
    prop::sample::select(EXTERNAL_NAMES).prop_flat_map(arb_name_variant)
}

/// One relationship entry: a linked character, a dangling id or an outsider
fn arb_entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (0..MAX_CHARACTERS, prop::option::of("[a-z ]{0,12}")).prop_map(|(i, label)| {
            json!({
                "name": format!("Character {i}"),
                "oc_id": format!("c{i}"),
                "relationship": label,
            })
        }),
        2 => arb_external_name().prop_map(|name| external_entry(&name)),
        1 => Just(linked_entry("Ghost", "missing-id")),
        1 => Just(json!({ "relationship": "no name" })),
        1 => Just(json!(42)),
    ]
}

/// A raw relationship field, sometimes malformed
fn arb_field() -> impl Strategy<Value = Value> {
    let entries = || prop::collection::vec(arb_entry(), 0..4);
    prop_oneof![
        4 => entries().prop_map(Value::Array),
        2 => entries().prop_map(|e| Value::String(Value::Array(e).to_string())),
        1 => Just(Value::Null),
        1 => "[^\\[]{0,10}".prop_map(Value::String),
        1 => any::<i64>().prop_map(|n| json!(n)),
        1 => Just(json!({ "name": "not a list" })),
    ]
}

fn arb_cast() -> impl Strategy<Value = Vec<Character>> {
    (1..=MAX_CHARACTERS).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec((arb_category(), arb_field()), 0..3), n)
            .prop_map(|fields_per_character| {
                fields_per_character
                    .into_iter()
                    .enumerate()
                    .map(|(i, fields)| {
                        fields.into_iter().fold(
                            Character::new(&format!("c{i}"), &format!("Character {i}")),
                            |c, (category, raw)| c.with_field(category, raw),
                        )
                    })
                    .collect()
            })
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn declared_pairs(graph: &RelationshipGraph) -> HashSet<(&str, &str)> {
    graph
        .relationships
        .iter()
        .filter(|r| !r.is_indirect)
        .map(|r| (r.source_id.as_str(), r.target_id.as_str()))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every edge connects two distinct existing nodes
    #[test]
    fn prop_edge_endpoints_exist(cast in arb_cast()) {
        let graph = compute_relationship_graph(&cast);
        for e in &graph.edges {
            prop_assert!(graph.node(&e.edge.from).is_some());
            prop_assert!(graph.node(&e.edge.to).is_some());
            prop_assert_ne!(&e.edge.from, &e.edge.to);
        }
    }

    /// Direct and inferred edges together hold at most one edge per pair
    #[test]
    fn prop_one_edge_per_pair(cast in arb_cast()) {
        let graph = compute_relationship_graph(&cast);
        let mut seen = HashSet::new();
        for e in &graph.edges {
            prop_assert!(seen.insert(PairKey::new(&e.edge.from, &e.edge.to)));
        }
    }

    /// An edge is bidirectional exactly when both ends declared each other
    #[test]
    fn prop_bidirectional_matches_declarations(cast in arb_cast()) {
        let graph = compute_relationship_graph(&cast);
        let declared = declared_pairs(&graph);
        for e in graph.edges.iter().filter(|e| !e.edge.is_indirect) {
            let (from, to) = (e.edge.from.as_str(), e.edge.to.as_str());
            let mutual = declared.contains(&(from, to)) && declared.contains(&(to, from));
            prop_assert_eq!(e.edge.is_bidirectional, mutual);
        }
    }

    /// Inferred edges sit between characters, have a via node adjacent to
    /// both ends, and never replace a declared pair
    #[test]
    fn prop_inferred_edges_are_two_hop(cast in arb_cast()) {
        let graph = compute_relationship_graph(&cast);
        let direct: HashSet<PairKey> = graph
            .edges
            .iter()
            .filter(|e| !e.edge.is_indirect)
            .map(|e| e.edge.key())
            .collect();

        for e in graph.edges.iter().filter(|e| e.edge.is_indirect) {
            let edge = &e.edge;
            prop_assert!(!direct.contains(&edge.key()));
            prop_assert!(!edge.is_bidirectional);

            let via = edge.via.as_deref().unwrap_or_default();
            prop_assert!(direct.contains(&PairKey::new(&edge.from, via)));
            prop_assert!(direct.contains(&PairKey::new(via, &edge.to)));

            for end in [&edge.from, &edge.to] {
                let node = graph.node(end).map(|n| n.node.is_external);
                prop_assert_eq!(node, Some(false));
            }
        }
    }

    /// Every spelling of an outsider's name maps onto one node
    #[test]
    fn prop_name_variants_share_external_node(
        variants in prop::collection::vec(arb_name_variant("Jane Doe"), 1..5)
    ) {
        let cast: Vec<Character> = variants
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Character::new(&format!("c{i}"), &format!("Character {i}"))
                    .with_field(RelationshipCategory::Other, json!([external_entry(name)]))
            })
            .collect();

        let graph = compute_relationship_graph(&cast);
        let externals: Vec<_> = graph.nodes.iter().filter(|n| n.node.is_external).collect();

        prop_assert_eq!(externals.len(), 1);
        prop_assert_eq!(&externals[0].node.id, &external_node_id("jane doe"));
        prop_assert_eq!(externals[0].node.name.as_str(), variants[0].trim());
    }

    /// Same input, byte-identical serialized output
    #[test]
    fn prop_deterministic(cast in arb_cast()) {
        let first = serde_json::to_string(&compute_relationship_graph(&cast)).unwrap();
        let second = serde_json::to_string(&compute_relationship_graph(&cast)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Positions are finite and framed by the viewport
    #[test]
    fn prop_nodes_inside_viewport(cast in arb_cast()) {
        let graph = compute_relationship_graph(&cast);
        prop_assert!(graph.viewport.width > 0.0 && graph.viewport.height > 0.0);
        for n in &graph.nodes {
            prop_assert!(n.x.is_finite() && n.y.is_finite());
            prop_assert!(graph.viewport.contains(n.x, n.y));
        }
    }

    /// Star casts of any size keep every spoke apart from the hub
    #[test]
    fn prop_star_nodes_do_not_overlap(spokes in 1usize..10) {
        let graph = compute_relationship_graph(&create_star_cast(spokes));
        prop_assert_eq!(graph.nodes.len(), spokes + 1);
        prop_assert_eq!(graph.edges.len(), spokes * (spokes + 1) / 2);

        for (i, a) in graph.nodes.iter().enumerate() {
            for b in &graph.nodes[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                prop_assert!(distance > 1.0, "{} and {} overlap", a.node.id, b.node.id);
            }
        }
    }
}

// ============================================================================
// Fixture Sanity
// ============================================================================

#[test]
fn test_chain_fixture_infers_one_edge() {
    let graph = compute_relationship_graph(&create_chain_cast());
    let inferred: Vec<_> = graph.edges.iter().filter(|e| e.edge.is_indirect).collect();
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].edge.key(), PairKey::new("a", "c"));
}

#[test]
fn test_mutual_fixture_is_bidirectional() {
    let graph = compute_relationship_graph(&create_mutual_pair());
    assert_eq!(graph.edges.len(), 1);
    assert!(graph.edges[0].edge.is_bidirectional);
}
