//! Domain layer for Wayfinder
//!
//! Contains the geographic value objects, the per-request entities produced
//! by route resolution, the polyline codec, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod polyline;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use polyline::PolylineError;
pub use value_objects::*;
