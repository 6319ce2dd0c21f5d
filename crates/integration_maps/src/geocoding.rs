//! Geocoding client
//!
//! Resolves free-form address text to candidate places using the
//! geocoding web service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::models::{GeocodeResponse, GeocodeResult};
use crate::transport::{common_params, get_body};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Geocode a free-form address
    ///
    /// Non-OK provider statuses are returned in the response, not as errors.
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, MapsError>;
}

/// Geocoding client for the Google geocoding web service
#[derive(Debug)]
pub struct GoogleGeocodingClient {
    client: Client,
    config: MapsConfig,
}

impl GoogleGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &MapsConfig) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Wayfinder/1.0")
            .build()
            .map_err(|e| MapsError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse a raw geocoding body into typed models
    fn parse_response(body: &str) -> Result<GeocodeResponse, MapsError> {
        let raw: RawGeocodeResponse =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        Ok(GeocodeResponse {
            status: raw.status,
            error_message: raw.error_message,
            results: raw
                .results
                .into_iter()
                .map(|r| GeocodeResult {
                    formatted_address: r.formatted_address,
                    latitude: r.geometry.location.lat,
                    longitude: r.geometry.location.lng,
                })
                .collect(),
        })
    }
}

#[async_trait]
impl GeocodingClient for GoogleGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, MapsError> {
        let mut params = vec![("address", address.to_string())];
        params.extend(common_params(&self.config.region_hint, &self.config.api_key));

        debug!("Geocoding address");

        let body = get_body(
            &self.client,
            &self.config.geocoding_url,
            &params,
            self.config.timeout_secs,
        )
        .await?;

        let response = Self::parse_response(&body)?;
        debug!(
            status = %response.status,
            count = response.results.len(),
            "Geocoding response"
        );
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<RawGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResult {
    #[serde(default)]
    formatted_address: String,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_response() {
        let body = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "Plaza Principal, Centro, Huauchinango, Pue., Mexico",
                "geometry": { "location": { "lat": 20.176, "lng": -98.054 } },
                "place_id": "abc"
            }]
        }"#;

        let response = GoogleGeocodingClient::parse_response(body).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(response.error_message, None);
        assert_eq!(response.results.len(), 1);
        assert_eq!(
            response.results[0].formatted_address,
            "Plaza Principal, Centro, Huauchinango, Pue., Mexico"
        );
        assert!((response.results[0].latitude - 20.176).abs() < f64::EPSILON);
        assert!((response.results[0].longitude + 98.054).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_error_status_without_results() {
        let body = r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#;
        let response = GoogleGeocodingClient::parse_response(body).unwrap();
        assert_eq!(response.status, "REQUEST_DENIED");
        assert_eq!(response.error_message.as_deref(), Some("bad key"));
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = GoogleGeocodingClient::parse_response("<html>");
        assert!(matches!(result, Err(MapsError::ParseError(_))));
    }

    #[test]
    fn test_parse_missing_geometry() {
        let body = r#"{"status": "OK", "results": [{"formatted_address": "X"}]}"#;
        assert!(GoogleGeocodingClient::parse_response(body).is_err());
    }
}
