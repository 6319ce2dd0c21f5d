//! Directions client

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoPoint;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::MapsConfig;
use crate::error::MapsError;
use crate::models::{DirectionsResponse, Leg, Route, Step};
use crate::transport::{common_params, get_body};

/// Trait for directions clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Request driving directions between two coordinates
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, MapsError>;
}

/// Directions client for the Google directions web service
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: MapsConfig,
}

impl GoogleDirectionsClient {
    /// Create a new directions client
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

    fn parse_response(body: &str) -> Result<DirectionsResponse, MapsError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        let routes = raw
            .routes
            .into_iter()
            .map(|route| Route {
                legs: route
                    .legs
                    .into_iter()
                    .map(|leg| Leg {
                        steps: leg
                            .steps
                            .into_iter()
                            .map(|step| Step {
                                polyline: step.polyline.points,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Ok(DirectionsResponse {
            status: raw.status,
            error_message: raw.error_message,
            routes,
        })
    }
}

#[async_trait]
impl DirectionsClient for GoogleDirectionsClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, MapsError> {
        let mut params = vec![
            ("origin", origin.to_query_value()),
            ("destination", destination.to_query_value()),
        ];
        params.extend(common_params(&self.config.region_hint, &self.config.api_key));

        debug!("Requesting directions");

        let body = get_body(
            &self.client,
            &self.config.directions_url,
            &params,
            self.config.timeout_secs,
        )
        .await?;

        let response = Self::parse_response(&body)?;
        debug!(
            status = %response.status,
            routes = response.routes.len(),
            "Directions response"
        );
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    polyline: RawPolyline,
}

#[derive(Debug, Deserialize)]
struct RawPolyline {
    points: String,
}
