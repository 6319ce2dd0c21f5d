//! Outcome of a route resolution request

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DestinationCandidate, RoutePath};

/// Classification of a failed resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport or connectivity failure talking to a provider
    NetworkError,
    /// Provider answered with a non-OK status
    ProviderStatusError,
    /// Geocoding returned no results
    NotFound,
    /// Resolved coordinate(s) lie outside the operating region
    OutOfRegion,
    /// Directions provider returned no route
    EmptyRoute,
    /// Malformed response body or polyline
    ParseError,
    /// The per-request deadline elapsed
    Timeout,
    /// The caller abandoned the request
    Cancelled,
}

impl ErrorKind {
    /// Whether a failure of this kind may succeed when simply retried
    ///
    /// Only transport failures qualify; provider verdicts and region checks
    /// are deterministic for the same input.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError)
    }

    /// Stable snake_case label, as used in logs and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::ProviderStatusError => "provider_status_error",
            Self::NotFound => "not_found",
            Self::OutOfRegion => "out_of_region",
            Self::EmptyRoute => "empty_route",
            Self::ParseError => "parse_error",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed resolution: its kind plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RouteFailure {
    /// Failure classification
    pub kind: ErrorKind,
    /// Message suitable for showing to the user
    pub message: String,
}

impl RouteFailure {
    /// Create a new failure
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The single result delivered for one resolution request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// A drawable route to a single in-region destination
    Success(RoutePath),
    /// Several in-region destinations matched; the caller must pick one
    ///
    /// Never empty. A single surviving candidate out of several provider
    /// results is still reported here rather than resolved automatically.
    Ambiguous(Vec<DestinationCandidate>),
    /// The request failed
    Failure(RouteFailure),
}

impl ResolutionOutcome {
    /// Shorthand for a failure outcome
    #[must_use]
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure(RouteFailure::new(kind, message))
    }

    /// Whether this is a successful route
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure kind, if this outcome is a failure
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failure(failure) => Some(failure.kind),
            _ => None,
        }
    }

    /// Short label for logging
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Ambiguous(_) => "ambiguous",
            Self::Failure(_) => "failure",
        }
    }
}

impl From<RouteFailure> for ResolutionOutcome {
    fn from(failure: RouteFailure) -> Self {
        Self::Failure(failure)
    }
}
