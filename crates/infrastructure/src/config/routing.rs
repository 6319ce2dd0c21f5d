//! Operating region and request handling configuration

use std::time::Duration;

use domain::DomainError;
use domain::value_objects::{GeoPoint, GeofenceRegion};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl CoordinateConfig {
    /// Convert to a validated `GeoPoint`
    pub fn to_geo_point(self) -> Result<GeoPoint, DomainError> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl From<GeoPoint> for CoordinateConfig {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }
    }
}

/// Operating region, defaulting to the Huauchinango service area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Southwest corner
    pub southwest: CoordinateConfig,
    /// Northeast corner
    pub northeast: CoordinateConfig,
}

impl Default for RegionConfig {
    fn default() -> Self {
        let region = GeofenceRegion::huauchinango();
        Self {
            southwest: region.southwest().into(),
            northeast: region.northeast().into(),
        }
    }
}

impl RegionConfig {
    /// Build the validated region
    pub fn to_region(&self) -> Result<GeofenceRegion, DomainError> {
        GeofenceRegion::new(self.southwest.to_geo_point()?, self.northeast.to_geo_point()?)
    }
}

/// Per-request handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Deadline for a whole resolution in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Capacity of the outcome event channel (default: 64)
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_event_buffer_size() -> usize {
    64
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

impl RoutingConfig {
    /// Request deadline as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
