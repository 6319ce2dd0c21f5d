//! Typed models for maps service responses

use serde::{Deserialize, Serialize};

/// A geocoding response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Provider status, e.g. `OK` or `ZERO_RESULTS`
    pub status: String,
    /// Provider detail accompanying a non-OK status
    pub error_message: Option<String>,
    /// Results in provider order
    pub results: Vec<GeocodeResult>,
}

/// A single geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Provider-formatted address
    pub formatted_address: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// A directions response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// Provider status
    pub status: String,
    /// Provider detail accompanying a non-OK status
    pub error_message: Option<String>,
    /// Routes, preferred first
    pub routes: Vec<Route>,
}

/// A route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Legs between waypoints
    pub legs: Vec<Leg>,
}

/// A leg of a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Steps in travel order
    pub steps: Vec<Step>,
}

/// A step of a leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Encoded polyline of the step
    pub polyline: String,
}
