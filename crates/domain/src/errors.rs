//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Region corners violate the southwest/northeast ordering
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
