//! A resolved, drawable route

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{GeoPoint, GeofenceRegion};

/// The path from an origin to a destination, in provider step order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoutePathFields")]
pub struct RoutePath {
    points: Vec<GeoPoint>,
    origin: GeoPoint,
    destination: GeoPoint,
    destination_name: String,
}

/// Unvalidated wire shape of a [`RoutePath`]
#[derive(Deserialize)]
struct RoutePathFields {
    points: Vec<GeoPoint>,
    origin: GeoPoint,
    destination: GeoPoint,
    destination_name: String,
}

impl TryFrom<RoutePathFields> for RoutePath {
    type Error = DomainError;

    fn try_from(fields: RoutePathFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.points,
            fields.origin,
            fields.destination,
            fields.destination_name,
        )
    }
}

impl RoutePath {
    /// Create a route path
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if `points` is empty.
    pub fn new(
        points: Vec<GeoPoint>,
        origin: GeoPoint,
        destination: GeoPoint,
        destination_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if points.is_empty() {
            return Err(DomainError::ValidationError(
                "route path must contain at least one point".to_string(),
            ));
        }
        Ok(Self {
            points,
            origin,
            destination,
            destination_name: destination_name.into(),
        })
    }

    /// Path points, never empty
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consume the path, returning its points
    #[must_use]
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    /// Where the route starts
    #[must_use]
    pub const fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// The geocoded destination coordinate
    #[must_use]
    pub const fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// Provider-formatted destination name
    #[must_use]
    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    /// Smallest region covering the origin and every path point
    #[must_use]
    pub fn bounds(&self) -> GeofenceRegion {
        GeofenceRegion::covering(&self.origin, &self.points)
    }
}
