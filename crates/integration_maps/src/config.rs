//! Maps service configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for the geocoding and directions clients
#[derive(Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Geocoding endpoint URL
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Directions endpoint URL
    #[serde(default = "default_directions_url")]
    pub directions_url: String,

    /// API key sent as the `key` query parameter; omitted when empty
    #[serde(default)]
    pub api_key: String,

    /// Region bias (ccTLD) sent with every request
    #[serde(default = "default_region_hint")]
    pub region_hint: String,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://maps.googleapis.com/maps/api/geocode/json".to_string()
}

fn default_directions_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}

fn default_region_hint() -> String {
    "mx".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            directions_url: default_directions_url(),
            api_key: String::new(),
            region_hint: default_region_hint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsConfig")
            .field("geocoding_url", &self.geocoding_url)
            .field("directions_url", &self.directions_url)
            .field("api_key", &"[REDACTED]")
            .field("region_hint", &self.region_hint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MapsConfig {
    /// Create a configuration pointing both endpoints at a mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            geocoding_url: format!("{base_url}/geocode/json"),
            directions_url: format!("{base_url}/directions/json"),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.geocoding_url.is_empty() {
            return Err("geocoding_url must not be empty".to_string());
        }

        if self.directions_url.is_empty() {
            return Err("directions_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
