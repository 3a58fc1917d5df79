//! Error types for relationship field decoding.
//!
//! None of these escape the engine: the parser recovers from every variant
//! by discarding the offending field or entry.

use thiserror::Error;

/// Result type alias for relationship parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum ParseError {
    // =========================================================================
    // Field Errors (whole field discarded)
    // =========================================================================

    /// Field text is not valid JSON.
    #[error("relationship field is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Field decoded, but not to an array.
    #[error("relationship field is not an array (found {0})")]
    NotAnArray(&'static str),

    // =========================================================================
    // Entry Errors (single element dropped)
    // =========================================================================

    #[error("relationship entry is not an object (found {0})")]
    EntryNotAnObject(&'static str),

    #[error("relationship entry has no target name")]
    MissingName,

    #[error("relationship entry is malformed: {0}")]
    MalformedEntry(#[source] serde_json::Error),
}

impl ParseError {
    /// Check if the error discards a whole field rather than one entry
    pub fn is_field_level(&self) -> bool {
        matches!(self, Self::InvalidJson(_) | Self::NotAnArray(_))
    }
}

/// Rejected layout constants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("canvas must be positive, got {width}x{height}")]
    EmptyCanvas { width: f64, height: f64 },

    #[error("iterations must be at least 1")]
    NoIterations,

    #[error("alpha_decay must be in [0, 1), got {0}")]
    DecayOutOfRange(f64),

    #[error("clip_margin {0} does not fit the canvas")]
    MarginTooLarge(f64),

    #[error("min_initial_radius exceeds max_initial_radius")]
    RadiusRange,

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}
