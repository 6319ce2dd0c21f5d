//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the maps web-service clients,
//! and provides configuration loading, retry policy, and logging setup.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::build_orchestrator;
pub use config::{AppConfig, CoordinateConfig, MapsAppConfig, RegionConfig, RoutingConfig};
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging};
