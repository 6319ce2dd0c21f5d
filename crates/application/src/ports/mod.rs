//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod directions_port;
mod geocoding_port;
mod provider_status;
mod route_listener;

#[cfg(test)]
pub use directions_port::MockDirectionsPort;
pub use directions_port::{
    DirectionsLeg, DirectionsPort, DirectionsReply, DirectionsRoute, DirectionsStep,
};
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodedPlace, GeocodingPort, GeocodingReply};
pub use provider_status::{ProviderStatus, STATUS_NOT_FOUND, STATUS_OK, STATUS_ZERO_RESULTS};
#[cfg(test)]
pub use route_listener::MockRouteListener;
pub use route_listener::{RouteListener, notify_listener};
