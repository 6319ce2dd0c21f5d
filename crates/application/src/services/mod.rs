//! Application services
//!
//! Services implement the use cases: resolving destination text, resolving
//! directions, and orchestrating complete route requests.

mod cancellation;
mod directions_resolver;
mod geocoding_resolver;
mod resolution_state;
mod route_orchestrator;

pub use cancellation::CancellationToken;
pub use directions_resolver::DirectionsResolver;
pub use geocoding_resolver::{DEFAULT_LOCALITY, GeocodeMatch, GeocodingResolver};
pub use resolution_state::{InvalidTransition, ResolutionState, Transition};
pub use route_orchestrator::{
    OrchestratorConfig, RouteEvent, RouteEvents, RouteOrchestrator, RouteRequestHandle,
};
