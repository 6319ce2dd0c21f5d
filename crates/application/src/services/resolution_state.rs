//! Per-request resolution state machine

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a route request currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    /// Not started, or finished and dispatched
    #[default]
    Idle,
    /// Waiting on the geocoding provider
    GeocodingInFlight,
    /// Several destinations matched; waiting for the caller to pick one
    AmbiguousPendingSelection,
    /// Waiting on the directions provider
    DirectionsInFlight,
    /// A route was produced
    Completed,
    /// The request failed
    Failed,
}

impl ResolutionState {
    /// States whose outcome is ready to dispatch
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::AmbiguousPendingSelection
        )
    }

    /// States in which a provider call is outstanding
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::GeocodingInFlight | Self::DirectionsInFlight)
    }

    /// Apply a transition
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when `transition` is not allowed from
    /// the current state.
    pub const fn advance(self, transition: Transition) -> Result<Self, InvalidTransition> {
        let next = match (self, transition) {
            (Self::Idle, Transition::Start) => Self::GeocodingInFlight,
            (Self::GeocodingInFlight, Transition::SingleMatch) => Self::DirectionsInFlight,
            (Self::GeocodingInFlight, Transition::MultipleMatches) => {
                Self::AmbiguousPendingSelection
            },
            (Self::GeocodingInFlight | Self::DirectionsInFlight, Transition::Fail) => Self::Failed,
            (Self::DirectionsInFlight, Transition::RouteFound) => Self::Completed,
            (
                Self::Completed | Self::Failed | Self::AmbiguousPendingSelection,
                Transition::Dispatched,
            ) => Self::Idle,
            (from, transition) => return Err(InvalidTransition { from, transition }),
        };
        Ok(next)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::GeocodingInFlight => "geocoding_in_flight",
            Self::AmbiguousPendingSelection => "ambiguous_pending_selection",
            Self::DirectionsInFlight => "directions_in_flight",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Events that move a request between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// A destination was submitted
    Start,
    /// Geocoding produced exactly one in-region destination
    SingleMatch,
    /// Geocoding produced several in-region destinations
    MultipleMatches,
    /// Directions produced a path
    RouteFound,
    /// Any failure, including timeout and cancellation
    Fail,
    /// The outcome was handed to the caller
    Dispatched,
}

/// A transition that is not allowed from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition {transition:?} from state {from}")]
pub struct InvalidTransition {
    /// State the transition was attempted from
    pub from: ResolutionState,
    /// The rejected transition
    pub transition: Transition,
}
