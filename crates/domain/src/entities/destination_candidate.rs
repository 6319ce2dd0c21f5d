//! A geocoded destination offered to the caller

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoPoint;

/// A named location returned by the geocoding provider
///
/// Candidates surfaced to callers always lie inside the configured
/// operating region; the geocoding resolver filters out the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationCandidate {
    /// Provider-formatted address, used verbatim when re-resolving
    pub display_name: String,
    /// Geocoded coordinate
    pub location: GeoPoint,
}

impl DestinationCandidate {
    /// Create a new candidate
    #[must_use]
    pub fn new(display_name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            display_name: display_name.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_candidate() {
        let candidate =
            DestinationCandidate::new("Plaza Principal", GeoPoint::new_unchecked(20.17, -98.05));
        assert_eq!(candidate.display_name, "Plaza Principal");
        assert!((candidate.location.latitude() - 20.17).abs() < f64::EPSILON);
    }

    #[test]
    fn candidate_serialization() {
        let candidate =
            DestinationCandidate::new("Mercado", GeoPoint::new_unchecked(20.18, -98.06));
        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains("\"display_name\":\"Mercado\""));
        let back: DestinationCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, candidate);
    }
}
