//! Directions resolver
//!
//! Requests a route to a resolved destination and flattens the first leg's
//! step polylines into one drawable path.

use std::fmt;
use std::sync::Arc;

use domain::entities::{DestinationCandidate, ErrorKind, RouteFailure, RoutePath};
use domain::polyline;
use domain::value_objects::GeoPoint;
use tracing::{debug, instrument, warn};

use crate::ports::{DirectionsPort, DirectionsReply, STATUS_NOT_FOUND};

/// Resolves a route from an origin to a chosen destination
pub struct DirectionsResolver {
    port: Arc<dyn DirectionsPort>,
}

impl fmt::Debug for DirectionsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionsResolver").finish_non_exhaustive()
    }
}

impl DirectionsResolver {
    /// Create a resolver over a directions port
    pub fn new(port: Arc<dyn DirectionsPort>) -> Self {
        Self { port }
    }

    /// Resolve the path from `origin` to `destination`
    ///
    /// # Errors
    ///
    /// Returns a [`RouteFailure`] for transport problems, non-OK provider
    /// statuses, missing routes, or undecodable step polylines.
    #[instrument(skip(self, destination), fields(destination = %destination.display_name))]
    pub async fn resolve(
        &self,
        origin: GeoPoint,
        destination: &DestinationCandidate,
    ) -> Result<RoutePath, RouteFailure> {
        let reply = self
            .port
            .directions(origin, destination.location)
            .await
            .map_err(|e| {
                warn!(error = %e, "Directions request failed");
                RouteFailure::new(e.kind(), format!("directions failed: {e}"))
            })?;

        let points = flatten_first_leg(&destination.display_name, reply)?;
        debug!(points = points.len(), "Decoded route path");

        RoutePath::new(
            points,
            origin,
            destination.location,
            destination.display_name.clone(),
        )
        .map_err(|e| RouteFailure::new(ErrorKind::EmptyRoute, e.to_string()))
    }
}

/// Concatenate the decoded step polylines of the first route's first leg
fn flatten_first_leg(
    destination: &str,
    reply: DirectionsReply,
) -> Result<Vec<GeoPoint>, RouteFailure> {
    let status = reply.status;
    if status.code == STATUS_NOT_FOUND {
        return Err(RouteFailure::new(
            ErrorKind::ProviderStatusError,
            format!("destination not found: {destination}. Try another name."),
        ));
    }
    if !status.is_ok() {
        warn!(status = %status.code, "Directions provider returned an error status");
        return Err(RouteFailure::new(
            ErrorKind::ProviderStatusError,
            status.describe(),
        ));
    }

    let Some(leg) = reply
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.legs.into_iter().next())
    else {
        return Err(empty_route());
    };

    let mut points = Vec::new();
    for (index, step) in leg.steps.iter().enumerate() {
        let decoded = polyline::decode(&step.encoded_polyline).map_err(|e| {
            RouteFailure::new(
                ErrorKind::ParseError,
                format!("invalid polyline in step {index}: {e}"),
            )
        })?;
        points.extend(decoded);
    }

    if points.is_empty() {
        return Err(empty_route());
    }
    Ok(points)
}

fn empty_route() -> RouteFailure {
    RouteFailure::new(ErrorKind::EmptyRoute, "no route found to the destination")
}
