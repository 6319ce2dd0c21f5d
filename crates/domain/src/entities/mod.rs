//! Domain entities - Objects produced per resolution request

mod destination_candidate;
mod resolution_outcome;
mod route_path;

pub use destination_candidate::DestinationCandidate;
pub use resolution_outcome::{ErrorKind, ResolutionOutcome, RouteFailure};
pub use route_path::RoutePath;
