//! Route orchestration
//!
//! Drives one request through geocoding and directions, enforcing the
//! per-request deadline and cancellation, and hands every outcome to the
//! caller exactly once.
//!
//! Requests can run inline with [`RouteOrchestrator::resolve`], or in the
//! background with [`RouteOrchestrator::submit`]. Background outcomes arrive
//! on the [`RouteEvents`] receiver in completion order.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::{DestinationCandidate, ErrorKind, ResolutionOutcome};
use domain::value_objects::{GeoPoint, GeofenceRegion, RequestId};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};

use super::cancellation::CancellationToken;
use super::directions_resolver::DirectionsResolver;
use super::geocoding_resolver::{DEFAULT_LOCALITY, GeocodeMatch, GeocodingResolver};
use super::resolution_state::{ResolutionState, Transition};
use crate::ports::{DirectionsPort, GeocodingPort, RouteListener, notify_listener};

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Locality appended to every destination query
    pub locality: String,
    /// Deadline for one request, covering both provider calls
    pub request_timeout: Duration,
    /// Capacity of the event channel; a full channel holds finished tasks
    /// until the receiver catches up
    pub event_buffer_size: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            locality: DEFAULT_LOCALITY.to_string(),
            request_timeout: Duration::from_secs(30),
            event_buffer_size: 64,
        }
    }
}

/// The outcome of one submitted request
#[derive(Debug, Clone, Serialize)]
pub struct RouteEvent {
    /// Request this outcome belongs to
    pub request_id: RequestId,
    /// Origin the request was submitted with
    pub origin: GeoPoint,
    /// Destination text the request was submitted with
    pub query: String,
    /// Terminal state reached before dispatch
    pub final_state: ResolutionState,
    /// The outcome
    pub outcome: ResolutionOutcome,
}

/// Receiving side of the orchestrator's event channel
#[derive(Debug)]
pub struct RouteEvents {
    receiver: mpsc::Receiver<RouteEvent>,
}

impl RouteEvents {
    /// Wait for the next outcome
    ///
    /// Returns `None` once every orchestrator handle is dropped and all
    /// submitted requests have been delivered.
    pub async fn recv(&mut self) -> Option<RouteEvent> {
        self.receiver.recv().await
    }

    /// Take an outcome if one is ready
    pub fn try_recv(&mut self) -> Option<RouteEvent> {
        self.receiver.try_recv().ok()
    }

    /// Deliver every remaining outcome to `listener`, returning how many
    /// were delivered
    pub async fn forward_to(mut self, listener: &dyn RouteListener) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.receiver.recv().await {
            notify_listener(listener, &event.outcome);
            delivered += 1;
        }
        delivered
    }
}

/// Handle to a submitted request
///
/// Dropping the handle does not cancel the request; its outcome is still
/// delivered on the event channel.
#[derive(Debug)]
pub struct RouteRequestHandle {
    id: RequestId,
    cancel: CancellationToken,
    state: watch::Receiver<ResolutionState>,
    task: JoinHandle<()>,
}

impl RouteRequestHandle {
    /// Request identifier, matching [`RouteEvent::request_id`]
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Latest observed state
    #[must_use]
    pub fn state(&self) -> ResolutionState {
        *self.state.borrow()
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<ResolutionState> {
        self.state.clone()
    }

    /// Cancel the request
    ///
    /// The request stops awaiting its provider and delivers a `Cancelled`
    /// failure, unless it already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the request task has ended
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the request task to end and return its final state
    pub async fn join(self) -> ResolutionState {
        if let Err(e) = self.task.await {
            warn!(request_id = %self.id, error = %e, "Route request task aborted");
        }
        *self.state.borrow()
    }
}

/// Publishes state changes of one request
struct StateTracker {
    id: RequestId,
    state: ResolutionState,
    publisher: watch::Sender<ResolutionState>,
}

impl StateTracker {
    fn new(id: RequestId, publisher: watch::Sender<ResolutionState>) -> Self {
        Self {
            id,
            state: ResolutionState::Idle,
            publisher,
        }
    }

    fn apply(&mut self, transition: Transition) {
        match self.state.advance(transition) {
            Ok(next) => {
                debug!(request_id = %self.id, from = %self.state, to = %next, "State transition");
                self.state = next;
                self.publisher.send_replace(next);
            },
            Err(e) => warn!(request_id = %self.id, error = %e, "Ignoring state transition"),
        }
    }
}

struct Inner {
    geocoder: GeocodingResolver,
    directions: DirectionsResolver,
    request_timeout: Duration,
    events: mpsc::Sender<RouteEvent>,
}

impl Inner {
    async fn execute(
        &self,
        tracker: &mut StateTracker,
        origin: GeoPoint,
        destination: &str,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        tracker.apply(Transition::Start);

        let outcome = {
            let pipeline = self.pipeline(tracker, origin, destination);
            tokio::select! {
                biased;
                () = cancel.cancelled() => ResolutionOutcome::failure(
                    ErrorKind::Cancelled,
                    "route request was cancelled",
                ),
                result = tokio::time::timeout(self.request_timeout, pipeline) => {
                    result.unwrap_or_else(|_| ResolutionOutcome::failure(
                        ErrorKind::Timeout,
                        format!(
                            "route request timed out after {}s",
                            self.request_timeout.as_secs_f64()
                        ),
                    ))
                },
            }
        };

        let terminal = match &outcome {
            ResolutionOutcome::Success(_) => Transition::RouteFound,
            ResolutionOutcome::Ambiguous(_) => Transition::MultipleMatches,
            ResolutionOutcome::Failure(_) => Transition::Fail,
        };
        tracker.apply(terminal);

        match &outcome {
            ResolutionOutcome::Success(path) => info!(
                request_id = %tracker.id,
                destination = %path.destination_name(),
                points = path.points().len(),
                "Route resolved"
            ),
            ResolutionOutcome::Ambiguous(candidates) => info!(
                request_id = %tracker.id,
                candidates = candidates.len(),
                "Destination is ambiguous"
            ),
            ResolutionOutcome::Failure(failure) => warn!(
                request_id = %tracker.id,
                kind = %failure.kind,
                message = %failure.message,
                "Route resolution failed"
            ),
        }

        outcome
    }

    async fn pipeline(
        &self,
        tracker: &mut StateTracker,
        origin: GeoPoint,
        destination: &str,
    ) -> ResolutionOutcome {
        let candidate = match self.geocoder.resolve(destination).await {
            Ok(GeocodeMatch::Single(candidate)) => candidate,
            Ok(GeocodeMatch::Ambiguous(candidates)) => {
                return ResolutionOutcome::Ambiguous(candidates);
            },
            Err(failure) => return failure.into(),
        };

        tracker.apply(Transition::SingleMatch);

        match self.directions.resolve(origin, &candidate).await {
            Ok(path) => ResolutionOutcome::Success(path),
            Err(failure) => failure.into(),
        }
    }
}

/// Resolves destination text into routes within a fixed operating region
#[derive(Clone)]
pub struct RouteOrchestrator {
    inner: Arc<Inner>,
}

impl fmt::Debug for RouteOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOrchestrator")
            .field("region", self.inner.geocoder.region())
            .field("request_timeout", &self.inner.request_timeout)
            .finish_non_exhaustive()
    }
}

impl RouteOrchestrator {
    /// Create an orchestrator and the receiver for its background outcomes
    pub fn new(
        geocoding: Arc<dyn GeocodingPort>,
        directions: Arc<dyn DirectionsPort>,
        region: GeofenceRegion,
        config: OrchestratorConfig,
    ) -> (Self, RouteEvents) {
        let (events, receiver) = mpsc::channel(config.event_buffer_size.max(1));
        let inner = Inner {
            geocoder: GeocodingResolver::new(geocoding, region, config.locality),
            directions: DirectionsResolver::new(directions),
            request_timeout: config.request_timeout,
            events,
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            RouteEvents { receiver },
        )
    }

    /// The operating region
    #[must_use]
    pub fn region(&self) -> &GeofenceRegion {
        self.inner.geocoder.region()
    }

    /// Resolve one request inline
    ///
    /// The outcome is returned directly and not sent on the event channel.
    pub async fn resolve(
        &self,
        origin: GeoPoint,
        destination: &str,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        let id = RequestId::new();
        let (publisher, _) = watch::channel(ResolutionState::Idle);
        let mut tracker = StateTracker::new(id, publisher);

        let outcome = self
            .inner
            .execute(&mut tracker, origin, destination, cancel)
            .instrument(info_span!("route_request", request_id = %id))
            .await;
        tracker.apply(Transition::Dispatched);
        outcome
    }

    /// Start a request in the background
    ///
    /// Must be called from within a Tokio runtime. The outcome is delivered
    /// once on the event channel.
    pub fn submit(&self, origin: GeoPoint, destination: impl Into<String>) -> RouteRequestHandle {
        let id = RequestId::new();
        let query = destination.into();
        let cancel = CancellationToken::new();
        let (publisher, state) = watch::channel(ResolutionState::Idle);
        let inner = Arc::clone(&self.inner);
        let token = cancel.clone();

        let task = tokio::spawn(
            async move {
                let mut tracker = StateTracker::new(id, publisher);
                let outcome = inner.execute(&mut tracker, origin, &query, &token).await;
                let event = RouteEvent {
                    request_id: id,
                    origin,
                    query,
                    final_state: tracker.state,
                    outcome,
                };
                if inner.events.send(event).await.is_err() {
                    debug!("Route event receiver dropped, outcome discarded");
                }
                tracker.apply(Transition::Dispatched);
            }
            .instrument(info_span!("route_request", request_id = %id)),
        );

        RouteRequestHandle {
            id,
            cancel,
            state,
            task,
        }
    }

    /// Start a request for a candidate picked from an ambiguous outcome
    ///
    /// The candidate's display name is resolved again as destination text.
    pub fn submit_candidate(
        &self,
        origin: GeoPoint,
        candidate: &DestinationCandidate,
    ) -> RouteRequestHandle {
        self.submit(origin, candidate.display_name.clone())
    }
}
