//! Property-based tests for the relationship graph
//!
//! Property tests verify invariants that should hold for any character list,
//! including malformed relationship fields.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `graph_props`: structural invariants of the computed graph
//!   - Every edge endpoint is a node
//!   - At most one edge per unordered pair, no self-loops
//!   - Bidirectional flag matches declarations in both directions
//!   - Inferred edges never shadow a direct edge
//!   - Name variants collapse into one external node
//!   - Same input gives the same output
//!   - Layout keeps nodes apart and inside the viewport

mod graph_props;
