//! Shared HTTP request handling

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::MapsError;

/// Issue a GET request and return the body of a successful response
///
/// 5xx and 429 responses are reported as retryable errors; every other
/// non-2xx status is a rejection.
pub(crate) async fn get_body(
    client: &Client,
    url: &str,
    params: &[(&str, String)],
    timeout_secs: u64,
) -> Result<String, MapsError> {
    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                MapsError::Timeout { timeout_secs }
            } else {
                // the request URL carries the API key
                MapsError::ConnectionFailed(e.without_url().to_string())
            }
        })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        warn!(?retry_after_secs, "Maps service rate limited the request");
        return Err(MapsError::RateLimitExceeded { retry_after_secs });
    }

    if status.is_server_error() {
        return Err(MapsError::ServiceUnavailable {
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        return Err(MapsError::RequestRejected {
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| MapsError::ParseError(e.without_url().to_string()))?;

    debug!(bytes = body.len(), "Received maps response");
    Ok(body)
}

/// Common query parameters: region hint and, when configured, the API key
pub(crate) fn common_params(region_hint: &str, api_key: &str) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2);
    if !region_hint.is_empty() {
        params.push(("region", region_hint.to_string()));
    }
    if !api_key.is_empty() {
        params.push(("key", api_key.to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_params_include_region_and_key() {
        let params = common_params("mx", "secret");
        assert_eq!(
            params,
            vec![("region", "mx".to_string()), ("key", "secret".to_string())]
        );
    }

    #[test]
    fn common_params_skip_empty_values() {
        assert!(common_params("", "").is_empty());
    }
}
