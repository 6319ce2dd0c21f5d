//! Geocoding provider port
//!
//! Turns a free-text address query into candidate places. Adapters in the
//! infrastructure layer implement this port over HTTP.

use async_trait::async_trait;
use domain::value_objects::GeoPoint;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::ProviderStatus;
use crate::error::ApplicationError;

/// A single place returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Provider-formatted address
    pub formatted_address: String,
    /// Place coordinate
    pub location: GeoPoint,
}

impl GeocodedPlace {
    /// Create a place
    #[must_use]
    pub fn new(formatted_address: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            location,
        }
    }
}

/// Parsed geocoding reply, results in provider order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingReply {
    /// Provider status envelope
    pub status: ProviderStatus,
    /// Matching places
    pub results: Vec<GeocodedPlace>,
}

impl GeocodingReply {
    /// An `OK` reply carrying `results`
    #[must_use]
    pub fn ok(results: Vec<GeocodedPlace>) -> Self {
        Self {
            status: ProviderStatus::ok(),
            results,
        }
    }

    /// A reply with a non-OK status and no results
    #[must_use]
    pub const fn with_status(status: ProviderStatus) -> Self {
        Self {
            status,
            results: Vec::new(),
        }
    }
}

/// Port for geocoding lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Look up an already composed address query
    ///
    /// A reply with a non-OK status is still `Ok`; interpreting it is up to
    /// the caller. Errors are reserved for transport, HTTP and body failures.
    async fn geocode(&self, address: &str) -> Result<GeocodingReply, ApplicationError>;
}
