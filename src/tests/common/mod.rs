//! Common Test Utilities
//!
//! Character fixtures shared by the pipeline-level test suites.

pub mod fixtures;

pub use fixtures::*;
