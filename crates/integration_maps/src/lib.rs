//! Maps web-service integration for Wayfinder
//!
//! Provides address geocoding and driving directions over the Google Maps
//! web services (or any server speaking the same JSON shape).
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern of the other integration
//! crates. [`GeocodingClient`] is implemented by [`GoogleGeocodingClient`],
//! [`DirectionsClient`] by [`GoogleDirectionsClient`]. Both classify HTTP
//! failures into [`MapsError`] and return the provider's status envelope
//! untouched; interpreting provider statuses is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_maps::{GeocodingClient, GoogleGeocodingClient, MapsConfig};
//!
//! let config = MapsConfig { api_key: "...".into(), ..MapsConfig::default() };
//! let client = GoogleGeocodingClient::new(&config)?;
//!
//! let response = client.geocode("Plaza Principal, Huauchinango, Puebla").await?;
//! ```

mod config;
mod directions;
mod error;
mod geocoding;
mod models;
mod transport;

pub use config::MapsConfig;
pub use directions::{DirectionsClient, GoogleDirectionsClient};
pub use error::MapsError;
pub use geocoding::{GeocodingClient, GoogleGeocodingClient};
pub use models::{DirectionsResponse, GeocodeResponse, GeocodeResult, Leg, Route, Step};
