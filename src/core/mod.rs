pub mod logging;

// Character relationship graph: parsing, building, inference and layout
pub mod relationship_graph;
