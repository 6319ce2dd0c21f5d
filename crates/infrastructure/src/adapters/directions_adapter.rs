//! Directions adapter - Implements DirectionsPort using integration_maps

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{
    DirectionsLeg, DirectionsPort, DirectionsReply, DirectionsRoute, DirectionsStep,
    ProviderStatus,
};
use async_trait::async_trait;
use domain::value_objects::GeoPoint;
use integration_maps::{DirectionsClient, DirectionsResponse, GoogleDirectionsClient, MapsConfig};
use tracing::{debug, instrument};

use super::map_maps_error;
use crate::retry::{RetryConfig, with_retry};

/// Adapter for the directions web service, retrying transient failures
pub struct DirectionsAdapter {
    client: Arc<dyn DirectionsClient>,
    retry: RetryConfig,
}

impl std::fmt::Debug for DirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsAdapter")
            .field("client", &"dyn DirectionsClient")
            .field("retry", &self.retry)
            .finish()
    }
}

impl DirectionsAdapter {
    /// Create an adapter backed by the Google directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &MapsConfig, retry: RetryConfig) -> Result<Self, ApplicationError> {
        let client = GoogleDirectionsClient::new(config).map_err(map_maps_error)?;
        Ok(Self::with_client(Arc::new(client), retry))
    }

    /// Create an adapter over any directions client
    #[must_use]
    pub fn with_client(client: Arc<dyn DirectionsClient>, retry: RetryConfig) -> Self {
        Self { client, retry }
    }

    fn convert(response: DirectionsResponse) -> DirectionsReply {
        let routes = response
            .routes
            .into_iter()
            .map(|route| DirectionsRoute {
                legs: route
                    .legs
                    .into_iter()
                    .map(|leg| DirectionsLeg {
                        steps: leg
                            .steps
                            .into_iter()
                            .map(|step| DirectionsStep::new(step.polyline))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let mut status = ProviderStatus::new(response.status);
        status.error_message = response.error_message;

        DirectionsReply { status, routes }
    }
}

#[async_trait]
impl DirectionsPort for DirectionsAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsReply, ApplicationError> {
        let outcome = with_retry(&self.retry, "directions", || {
            self.client.directions(origin, destination)
        })
        .await;
        debug!(attempts = outcome.attempts, "Directions call finished");

        outcome
            .into_result()
            .map(Self::convert)
            .map_err(map_maps_error)
    }
}
