//! Maps error types

use thiserror::Error;

/// Errors that can occur talking to the maps web services
#[derive(Debug, Error)]
pub enum MapsError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The service answered with a 5xx status
    #[error("Service unavailable: HTTP {status}")]
    ServiceUnavailable {
        /// HTTP status code
        status: u16,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// The service rejected the request with a non-retryable HTTP status
    #[error("HTTP {status}")]
    RequestRejected {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl MapsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout { .. }
                | Self::ServiceUnavailable { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}
