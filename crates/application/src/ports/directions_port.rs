//! Directions provider port

use async_trait::async_trait;
use domain::value_objects::GeoPoint;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use super::ProviderStatus;
use crate::error::ApplicationError;

/// One maneuver of a leg, carrying its own encoded polyline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsStep {
    /// Encoded polyline of this step
    pub encoded_polyline: String,
}

impl DirectionsStep {
    /// Create a step from its encoded polyline
    #[must_use]
    pub fn new(encoded_polyline: impl Into<String>) -> Self {
        Self {
            encoded_polyline: encoded_polyline.into(),
        }
    }
}

/// A leg between two waypoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsLeg {
    /// Steps in travel order
    pub steps: Vec<DirectionsStep>,
}

/// A candidate route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    /// Legs in travel order
    pub legs: Vec<DirectionsLeg>,
}

/// Parsed directions reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsReply {
    /// Provider status envelope
    pub status: ProviderStatus,
    /// Routes, preferred first
    pub routes: Vec<DirectionsRoute>,
}

impl DirectionsReply {
    /// An `OK` reply with a single one-leg route made of `steps`
    #[must_use]
    pub fn single_leg(steps: Vec<DirectionsStep>) -> Self {
        Self {
            status: ProviderStatus::ok(),
            routes: vec![DirectionsRoute {
                legs: vec![DirectionsLeg { steps }],
            }],
        }
    }

    /// A reply with a non-OK status and no routes
    #[must_use]
    pub const fn with_status(status: ProviderStatus) -> Self {
        Self {
            status,
            routes: Vec::new(),
        }
    }
}

/// Port for driving directions between two coordinates
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Request directions from `origin` to `destination`
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsReply, ApplicationError>;
}
