//! Logging setup

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
