//! Wiring of configured adapters into a route orchestrator

use std::sync::Arc;

use application::{ApplicationError, RouteEvents, RouteOrchestrator};
use tracing::info;

use crate::adapters::{DirectionsAdapter, GeocodingAdapter};
use crate::config::AppConfig;

/// Build an orchestrator backed by the maps web services
///
/// The configuration is validated first; nothing is contacted over the
/// network until a request is submitted.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` for invalid settings and
/// `ApplicationError::Domain` for an invalid operating region.
pub fn build_orchestrator(
    config: &AppConfig,
) -> Result<(RouteOrchestrator, RouteEvents), ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let region = config.geofence()?;
    let maps = config.maps.to_maps_config();
    let geocoding = GeocodingAdapter::new(&maps, config.retry.clone())?;
    let directions = DirectionsAdapter::new(&maps, config.retry.clone())?;

    info!(
        geocoding_url = %maps.geocoding_url,
        directions_url = %maps.directions_url,
        locality = %config.maps.locality,
        "Route orchestrator configured"
    );

    Ok(RouteOrchestrator::new(
        Arc::new(geocoding),
        Arc::new(directions),
        region,
        config.orchestrator_config(),
    ))
}
