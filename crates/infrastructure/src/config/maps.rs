//! Maps provider configuration

use integration_maps::MapsConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Maps web-service settings
#[derive(Clone, Serialize, Deserialize)]
pub struct MapsAppConfig {
    /// Geocoding endpoint URL
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Directions endpoint URL
    #[serde(default = "default_directions_url")]
    pub directions_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Region bias sent with every request (default: "mx")
    #[serde(default = "default_region_hint")]
    pub region_hint: String,

    /// Locality appended to destination text (default: "Huauchinango, Puebla")
    #[serde(default = "default_locality")]
    pub locality: String,

    /// Per-request HTTP timeout in seconds (default: 10)
    #[serde(default = "default_maps_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MapsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsAppConfig")
            .field("geocoding_url", &self.geocoding_url)
            .field("directions_url", &self.directions_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("region_hint", &self.region_hint)
            .field("locality", &self.locality)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_geocoding_url() -> String {
    MapsConfig::default().geocoding_url
}

fn default_directions_url() -> String {
    MapsConfig::default().directions_url
}

fn default_region_hint() -> String {
    "mx".to_string()
}

fn default_locality() -> String {
    application::DEFAULT_LOCALITY.to_string()
}

const fn default_maps_timeout() -> u64 {
    10
}

impl Default for MapsAppConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            directions_url: default_directions_url(),
            api_key: None,
            region_hint: default_region_hint(),
            locality: default_locality(),
            timeout_secs: default_maps_timeout(),
        }
    }
}

impl MapsAppConfig {
    /// Convert to `integration_maps::MapsConfig`
    #[must_use]
    pub fn to_maps_config(&self) -> MapsConfig {
        MapsConfig {
            geocoding_url: self.geocoding_url.clone(),
            directions_url: self.directions_url.clone(),
            api_key: self.api_key_str().to_string(),
            region_hint: self.region_hint.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// The API key, or an empty string when unset
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key.as_ref().map_or("", |key| key.expose_secret())
    }
}
