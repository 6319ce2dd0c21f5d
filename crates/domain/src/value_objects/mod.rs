//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod geofence_region;
mod request_id;

pub use geo_point::GeoPoint;
pub use geofence_region::GeofenceRegion;
pub use request_id::RequestId;
