//! Logging setup when the host already owns the `log` facade.
//!
//! Kept in its own test binary: both the `log` logger and the tracing
//! subscriber are process-wide.

use oc_relgraph::core::logging::{init, LoggingConfig, LoggingError};

struct HostLogger;

impl log::Log for HostLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        false
    }

    fn log(&self, _: &log::Record) {}

    fn flush(&self) {}
}

static HOST_LOGGER: HostLogger = HostLogger;

#[test]
fn test_existing_log_logger_reports_bridge_failure() {
    log::set_logger(&HOST_LOGGER).unwrap();

    let err = init(&LoggingConfig::default()).unwrap_err();
    assert!(matches!(err, LoggingError::LogBridge(_)));

    // The subscriber went in before the bridge failed
    assert!(matches!(
        init(&LoggingConfig::default()),
        Err(LoggingError::AlreadyInitialized)
    ));
}
