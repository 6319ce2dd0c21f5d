//! Geocoding resolver
//!
//! Turns free destination text into either a single in-region candidate or
//! a list of in-region candidates for the caller to choose from.

use std::fmt;
use std::sync::Arc;

use domain::entities::{DestinationCandidate, ErrorKind, RouteFailure};
use domain::value_objects::GeofenceRegion;
use tracing::{debug, instrument, warn};

use crate::ports::{GeocodingPort, GeocodingReply, STATUS_NOT_FOUND};

/// Default locality appended to every destination query
pub const DEFAULT_LOCALITY: &str = "Huauchinango, Puebla";

/// Result of a successful geocoding lookup
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeMatch {
    /// Exactly one provider result, inside the region
    Single(DestinationCandidate),
    /// Several provider results, filtered to the region; never empty
    Ambiguous(Vec<DestinationCandidate>),
}

/// Resolves destination text against a fixed operating region
pub struct GeocodingResolver {
    port: Arc<dyn GeocodingPort>,
    region: GeofenceRegion,
    locality: String,
}

impl fmt::Debug for GeocodingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingResolver")
            .field("region", &self.region)
            .field("locality", &self.locality)
            .finish_non_exhaustive()
    }
}

impl GeocodingResolver {
    /// Create a resolver
    ///
    /// An empty `locality` sends the destination text unqualified.
    pub fn new(
        port: Arc<dyn GeocodingPort>,
        region: GeofenceRegion,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            port,
            region,
            locality: locality.into(),
        }
    }

    /// The region candidates are checked against
    #[must_use]
    pub const fn region(&self) -> &GeofenceRegion {
        &self.region
    }

    /// Build the provider query for a destination
    #[must_use]
    pub fn compose_query(&self, destination: &str) -> String {
        let destination = destination.trim();
        if self.locality.is_empty() {
            destination.to_string()
        } else {
            format!("{destination}, {}", self.locality)
        }
    }

    /// Resolve destination text
    ///
    /// # Errors
    ///
    /// Returns a [`RouteFailure`] for blank input, transport problems,
    /// non-OK provider statuses, no matches, or matches outside the region.
    #[instrument(skip(self))]
    pub async fn resolve(&self, destination: &str) -> Result<GeocodeMatch, RouteFailure> {
        if destination.trim().is_empty() {
            return Err(RouteFailure::new(
                ErrorKind::NotFound,
                "destination text is empty",
            ));
        }

        let query = self.compose_query(destination);
        debug!(query = %query, "Geocoding destination");

        let reply = self.port.geocode(&query).await.map_err(|e| {
            warn!(error = %e, "Geocoding request failed");
            RouteFailure::new(e.kind(), format!("geocoding failed: {e}"))
        })?;

        self.classify(destination.trim(), reply)
    }

    /// Interpret a provider reply for `destination`
    fn classify(
        &self,
        destination: &str,
        reply: GeocodingReply,
    ) -> Result<GeocodeMatch, RouteFailure> {
        let status = reply.status;
        if status.is_zero_results() {
            return Err(not_found(destination));
        }
        if status.code == STATUS_NOT_FOUND {
            return Err(RouteFailure::new(
                ErrorKind::ProviderStatusError,
                format!("destination not found: {destination}. Try another name."),
            ));
        }
        if !status.is_ok() {
            warn!(status = %status.code, "Geocoding provider returned an error status");
            return Err(RouteFailure::new(
                ErrorKind::ProviderStatusError,
                status.describe(),
            ));
        }

        let mut results = reply.results;
        match results.len() {
            0 => Err(not_found(destination)),
            1 => {
                let place = results.remove(0);
                if self.region.contains(&place.location) {
                    Ok(GeocodeMatch::Single(DestinationCandidate::new(
                        place.formatted_address,
                        place.location,
                    )))
                } else {
                    debug!(location = %place.location, "Single match outside region");
                    Err(out_of_region(destination))
                }
            },
            total => {
                let candidates: Vec<_> = results
                    .into_iter()
                    .filter(|place| self.region.contains(&place.location))
                    .map(|place| DestinationCandidate::new(place.formatted_address, place.location))
                    .collect();
                debug!(total, in_region = candidates.len(), "Filtered geocoding results");

                if candidates.is_empty() {
                    Err(out_of_region(destination))
                } else {
                    Ok(GeocodeMatch::Ambiguous(candidates))
                }
            },
        }
    }
}

fn not_found(destination: &str) -> RouteFailure {
    RouteFailure::new(
        ErrorKind::NotFound,
        format!("destination not found: {destination}"),
    )
}

fn out_of_region(destination: &str) -> RouteFailure {
    RouteFailure::new(
        ErrorKind::OutOfRegion,
        format!("destination is outside the service area: {destination}"),
    )
}
