//! Infrastructure adapters
//!
//! Adapters connect application ports to the maps integration clients.

mod directions_adapter;
mod geocoding_adapter;

pub use directions_adapter::DirectionsAdapter;
pub use geocoding_adapter::GeocodingAdapter;

use application::error::ApplicationError;
use integration_maps::MapsError;

/// Translate a maps client error into the application's classification
pub(crate) fn map_maps_error(err: MapsError) -> ApplicationError {
    match err {
        MapsError::ConnectionFailed(_)
        | MapsError::Timeout { .. }
        | MapsError::ServiceUnavailable { .. }
        | MapsError::RateLimitExceeded { .. } => ApplicationError::Network(err.to_string()),
        MapsError::RequestRejected { .. } => ApplicationError::ProviderRejected(err.to_string()),
        MapsError::ParseError(message) => ApplicationError::Parse(message),
        MapsError::ConfigurationError(message) => ApplicationError::Configuration(message),
    }
}

#[cfg(test)]
mod tests {
    use domain::ErrorKind;

    use super::*;

    #[test]
    fn transient_errors_become_network_errors() {
        for err in [
            MapsError::ConnectionFailed("refused".to_string()),
            MapsError::Timeout { timeout_secs: 10 },
            MapsError::ServiceUnavailable { status: 502 },
            MapsError::RateLimitExceeded {
                retry_after_secs: None,
            },
        ] {
            let mapped = map_maps_error(err);
            assert!(mapped.is_retryable());
            assert_eq!(mapped.kind(), ErrorKind::NetworkError);
        }
    }

    #[test]
    fn rejected_request_keeps_http_status() {
        let mapped = map_maps_error(MapsError::RequestRejected { status: 403 });
        assert_eq!(mapped.kind(), ErrorKind::ProviderStatusError);
        assert_eq!(mapped.to_string(), "Provider rejected request: HTTP 403");
    }

    #[test]
    fn parse_errors_map_to_parse_kind() {
        let mapped = map_maps_error(MapsError::ParseError("expected value".to_string()));
        assert_eq!(mapped.kind(), ErrorKind::ParseError);
        assert!(!mapped.is_retryable());
    }
}
