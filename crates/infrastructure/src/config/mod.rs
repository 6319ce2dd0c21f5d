//! Application configuration
//!
//! Split into focused sub-modules:
//! - `maps`: provider endpoints, credentials, query qualifiers
//! - `routing`: operating region and per-request handling
//!
//! Retry and logging settings reuse [`RetryConfig`] and [`LoggingConfig`].

mod maps;
mod routing;

use application::OrchestratorConfig;
use domain::value_objects::GeofenceRegion;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use maps::MapsAppConfig;
pub use routing::{CoordinateConfig, RegionConfig, RoutingConfig};

use crate::retry::RetryConfig;
use crate::telemetry::LoggingConfig;

/// Base name of the optional configuration file (`wayfinder.toml`, ...)
pub const CONFIG_FILE: &str = "wayfinder";

/// Prefix of environment overrides, e.g. `WAYFINDER_MAPS__API_KEY`
pub const ENV_PREFIX: &str = "WAYFINDER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maps provider configuration
    #[serde(default)]
    pub maps: MapsAppConfig,

    /// Operating region
    #[serde(default)]
    pub region: RegionConfig,

    /// Request handling
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Retry policy for transient provider failures
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `wayfinder.*` in the working directory and
    /// `WAYFINDER_*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from an explicit file base name, plus environment
    ///
    /// The file is optional. Environment variables use `__` between nested
    /// keys: `WAYFINDER_ROUTING__REQUEST_TIMEOUT_SECS=10`.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        debug!(?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.region.to_region().map_err(|e| e.to_string())?;

        if self.maps.geocoding_url.trim().is_empty() {
            return Err("maps.geocoding_url must not be empty".to_string());
        }
        if self.maps.directions_url.trim().is_empty() {
            return Err("maps.directions_url must not be empty".to_string());
        }
        if self.maps.api_key_str().trim().is_empty() {
            return Err(format!(
                "maps.api_key is not configured (set {ENV_PREFIX}_MAPS__API_KEY)"
            ));
        }
        if self.maps.timeout_secs == 0 {
            return Err("maps.timeout_secs must be greater than 0".to_string());
        }
        if self.routing.request_timeout_secs == 0 {
            return Err("routing.request_timeout_secs must be greater than 0".to_string());
        }

        self.retry.validate()
    }

    /// The validated operating region
    pub fn geofence(&self) -> Result<GeofenceRegion, domain::DomainError> {
        self.region.to_region()
    }

    /// Settings for the route orchestrator
    #[must_use]
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            locality: self.maps.locality.clone(),
            request_timeout: self.routing.request_timeout(),
            event_buffer_size: self.routing.event_buffer_size,
        }
    }
}
