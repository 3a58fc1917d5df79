//! Crate-internal test suites.
//!
//! Unit tests live next to the code they cover; this tree holds shared
//! fixtures and the proptest suites that exercise the whole pipeline.

pub mod common;
mod property;
