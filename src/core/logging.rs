//! Logging Setup
//!
//! The engine itself only emits `log` records and `tracing` spans. Host
//! applications that want them rendered call [`init`] once at startup:
//! - `tracing-subscriber` fmt layer on stderr (human readable or JSON)
//! - `EnvFilter` from `RUST_LOG`, falling back to the configured level
//! - `log` macros redirected to `tracing` through `tracing-log`

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset or invalid
    pub level: String,
    /// Emit one JSON object per event instead of formatted text
    pub json: bool,
    /// Include the event target (module path)
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            with_target: true,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("a global logger is already installed")]
    AlreadyInitialized,

    /// The subscriber is installed but `log` records are not forwarded to it
    #[error("failed to bridge log records into tracing: {0}")]
    LogBridge(#[source] log::SetLoggerError),
}

// ============================================================================
// Initialization
// ============================================================================

/// Parse filter directives such as `"info,oc_relgraph=debug"`.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|source| LoggingError::InvalidFilter {
        filter: directives.to_string(),
        source,
    })
}

/// `RUST_LOG` wins when it parses; otherwise the configured level is used.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(&config.level),
    }
}

/// Install the global subscriber and the `log` bridge.
///
/// Fails with [`LoggingError::AlreadyInitialized`] on a second call or when
/// the host already installed its own subscriber. [`LoggingError::LogBridge`]
/// means the subscriber is live but another `log` logger was set first.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;

    let layer = if config.json {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json()
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed()
    };

    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    tracing_log::LogTracer::init().map_err(LoggingError::LogBridge)?;

    log::debug!("Logging initialized at '{}'", config.level);
    Ok(())
}
