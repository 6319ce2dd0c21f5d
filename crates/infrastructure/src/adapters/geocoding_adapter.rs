//! Geocoding adapter - Implements GeocodingPort using integration_maps

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{GeocodedPlace, GeocodingPort, GeocodingReply, ProviderStatus};
use async_trait::async_trait;
use domain::value_objects::GeoPoint;
use integration_maps::{GeocodeResponse, GeocodingClient, GoogleGeocodingClient, MapsConfig};
use tracing::{debug, instrument};

use super::map_maps_error;
use crate::retry::{RetryConfig, with_retry};

/// Adapter for the geocoding web service, retrying transient failures
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
    retry: RetryConfig,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"dyn GeocodingClient")
            .field("retry", &self.retry)
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create an adapter backed by the Google geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &MapsConfig, retry: RetryConfig) -> Result<Self, ApplicationError> {
        let client = GoogleGeocodingClient::new(config).map_err(map_maps_error)?;
        Ok(Self::with_client(Arc::new(client), retry))
    }

    /// Create an adapter over any geocoding client
    #[must_use]
    pub fn with_client(client: Arc<dyn GeocodingClient>, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    fn convert(response: GeocodeResponse) -> Result<GeocodingReply, ApplicationError> {
        let results = response
            .results
            .into_iter()
            .map(|r| {
                let location = GeoPoint::new(r.latitude, r.longitude)?;
                Ok(GeocodedPlace::new(r.formatted_address, location))
            })
            .collect::<Result<Vec<_>, ApplicationError>>()?;

        let mut status = ProviderStatus::new(response.status);
        status.error_message = response.error_message;

        Ok(GeocodingReply { status, results })
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodingReply, ApplicationError> {
        let outcome = with_retry(&self.retry, "geocode", || self.client.geocode(address)).await;
        debug!(attempts = outcome.attempts, "Geocoding call finished");

        let response = outcome.into_result().map_err(map_maps_error)?;
        Self::convert(response)
    }
}
