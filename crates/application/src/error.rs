//! Application-level errors

use domain::{DomainError, ErrorKind};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error, e.g. a provider coordinate out of range
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Transport failure talking to an external provider
    #[error("Network error: {0}")]
    Network(String),

    /// The provider refused the request at the HTTP level
    #[error("Provider rejected request: {0}")]
    ProviderRejected(String),

    /// Response body could not be understood
    #[error("Malformed provider response: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Only transport failures are; everything else is deterministic for the
    /// same request.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Map onto the failure classification delivered to callers
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::NetworkError,
            Self::Domain(_) | Self::Parse(_) => ErrorKind::ParseError,
            Self::ProviderRejected(_) | Self::Configuration(_) | Self::Internal(_) => {
                ErrorKind::ProviderStatusError
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(ApplicationError::Network("reset".to_string()).is_retryable());
        assert!(!ApplicationError::ProviderRejected("HTTP 403".to_string()).is_retryable());
        assert!(!ApplicationError::Parse("eof".to_string()).is_retryable());
        assert!(!ApplicationError::Configuration("no key".to_string()).is_retryable());
    }

    #[test]
    fn kind_mapping() {
        assert_eq!(
            ApplicationError::Network("x".to_string()).kind(),
            ErrorKind::NetworkError
        );
        assert_eq!(
            ApplicationError::Parse("x".to_string()).kind(),
            ErrorKind::ParseError
        );
        assert_eq!(
            ApplicationError::Domain(DomainError::ValidationError("x".to_string())).kind(),
            ErrorKind::ParseError
        );
        assert_eq!(
            ApplicationError::ProviderRejected("HTTP 403".to_string()).kind(),
            ErrorKind::ProviderStatusError
        );
    }

    #[test]
    fn error_display() {
        let err = ApplicationError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
