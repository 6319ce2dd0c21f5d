//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - End-to-end route resolution against mocked maps endpoints
//! - Retry of transient provider failures
//! - Retry delay bounds with property-based tests

use std::time::Duration;

use application::{CancellationToken, ResolutionState, RouteEvents, RouteOrchestrator};
use domain::polyline;
use domain::value_objects::GeoPoint;
use domain::{ErrorKind, ResolutionOutcome};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infrastructure::{AppConfig, RetryConfig, build_orchestrator};

const EVENT_WAIT: Duration = Duration::from_secs(5);

fn origin() -> GeoPoint {
    GeoPoint::new_unchecked(20.17, -98.05)
}

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.maps.geocoding_url = format!("{}/geocode/json", server.uri());
    config.maps.directions_url = format!("{}/directions/json", server.uri());
    config.maps.api_key = Some(SecretString::from("test-key".to_string()));
    config.maps.timeout_secs = 5;
    config.retry = RetryConfig {
        initial_delay_ms: 10,
        max_delay_ms: 50,
        max_retries: 2,
        jitter_enabled: false,
        ..RetryConfig::default()
    };
    config
}

fn orchestrator_for(server: &MockServer) -> (RouteOrchestrator, RouteEvents) {
    build_orchestrator(&config_for(server)).unwrap()
}

fn geocode_result(address: &str, lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "formatted_address": address,
        "geometry": { "location": { "lat": lat, "lng": lng } }
    })
}

fn route_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new_unchecked(20.17, -98.05),
        GeoPoint::new_unchecked(20.172, -98.052),
        GeoPoint::new_unchecked(20.1762, -98.0541),
    ]
}

fn directions_body() -> serde_json::Value {
    let points = route_points();
    json!({
        "status": "OK",
        "routes": [{
            "legs": [{
                "steps": [
                    { "polyline": { "points": polyline::encode(&points[..2]) } },
                    { "polyline": { "points": polyline::encode(&points[2..]) } }
                ]
            }]
        }]
    })
}

async fn mount_directions(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/directions/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// End-to-end resolution
// ============================================================================

mod resolution_tests {
    use super::*;

    #[tokio::test]
    async fn single_in_region_match_yields_route() {
        let server = MockServer::start().await;
        let address = "Plaza Principal, Centro, 73160 Huauchinango, Pue., Mexico";

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "Plaza Principal, Huauchinango, Puebla"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [geocode_result(address, 20.1762, -98.0541)]
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_directions(&server, 1).await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "  Plaza Principal ", &CancellationToken::new())
            .await;

        let path = match outcome {
            ResolutionOutcome::Success(path) => path,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(path.destination_name(), address);
        assert_eq!(path.points().len(), route_points().len());
        for (actual, expected) in path.points().iter().zip(route_points()) {
            assert!(actual.approx_eq(&expected, 1e-5));
        }
    }

    #[tokio::test]
    async fn zero_results_never_requests_directions() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_directions(&server, 0).await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Nowhere", &CancellationToken::new())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn out_of_region_match_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [geocode_result("Zócalo, CDMX", 19.4326, -99.1332)]
            })))
            .mount(&server)
            .await;
        mount_directions(&server, 0).await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Zócalo", &CancellationToken::new())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::OutOfRegion));
    }

    #[tokio::test]
    async fn several_matches_are_filtered_then_picked() {
        let server = MockServer::start().await;
        let centro = "Mercado Municipal, Centro, Huauchinango, Pue., Mexico";
        let norte = "Mercado Municipal, Col. Norte, Huauchinango, Pue., Mexico";

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", "Mercado, Huauchinango, Puebla"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [
                    geocode_result(centro, 20.175, -98.053),
                    geocode_result("Mercado, Puebla, Pue., Mexico", 19.04, -98.2),
                    geocode_result(norte, 20.19, -98.04)
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .and(query_param("address", format!("{norte}, Huauchinango, Puebla")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [geocode_result(norte, 20.19, -98.04)]
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_directions(&server, 1).await;

        let (orchestrator, mut events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Mercado", &CancellationToken::new())
            .await;

        let candidates = match outcome {
            ResolutionOutcome::Ambiguous(candidates) => candidates,
            other => panic!("expected ambiguous, got {other:?}"),
        };
        let names: Vec<_> = candidates.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, [centro, norte]);

        orchestrator.submit_candidate(origin(), &candidates[1]);
        let event = tokio::time::timeout(EVENT_WAIT, events.recv())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(event.final_state, ResolutionState::Completed);
        let path = match event.outcome {
            ResolutionOutcome::Success(path) => path,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(path.destination_name(), norte);
    }

    #[tokio::test]
    async fn directions_zero_results_is_provider_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [geocode_result("Presa Necaxa", 20.2, -98.0)]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/directions/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ZERO_RESULTS", "routes": [] })),
            )
            .mount(&server)
            .await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Presa Necaxa", &CancellationToken::new())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::ProviderStatusError));
    }

    #[tokio::test]
    async fn single_step_route_decodes_reference_polyline() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [geocode_result("Plaza Principal", 20.1762, -98.0541)]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/directions/json"))
            .and(query_param("destination", "20.1762,-98.0541"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "routes": [{
                    "legs": [{
                        "steps": [{ "polyline": { "points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@" } }]
                    }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Plaza Principal", &CancellationToken::new())
            .await;

        let path = match outcome {
            ResolutionOutcome::Success(path) => path,
            other => panic!("expected success, got {other:?}"),
        };
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(path.points().len(), expected.len());
        for (actual, &(lat, lng)) in path.points().iter().zip(&expected) {
            assert!(actual.approx_eq(&GeoPoint::new_unchecked(lat, lng), 1e-5));
        }
    }

    #[tokio::test]
    async fn rejected_request_is_provider_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Plaza", &CancellationToken::new())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::ProviderStatusError));
    }
}

// ============================================================================
// Retry behaviour
// ============================================================================

mod retry_tests {
    use super::*;

    #[tokio::test]
    async fn transient_failure_is_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [geocode_result("Plaza Principal", 20.1762, -98.0541)]
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_directions(&server, 1).await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Plaza Principal", &CancellationToken::new())
            .await;

        assert!(outcome.is_success(), "got {outcome:?}");
    }

    #[tokio::test]
    async fn exhausted_retries_report_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Plaza Principal", &CancellationToken::new())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::NetworkError));
    }

    #[tokio::test]
    async fn malformed_body_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .expect(1)
            .mount(&server)
            .await;

        let (orchestrator, _events) = orchestrator_for(&server);
        let outcome = orchestrator
            .resolve(origin(), "Plaza Principal", &CancellationToken::new())
            .await;

        assert_eq!(outcome.error_kind(), Some(ErrorKind::ParseError));
    }
}

// ============================================================================
// Retry delay properties
// ============================================================================

mod retry_delay_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn delay_never_exceeds_jittered_cap(
            initial in 1u64..1_000,
            extra in 0u64..10_000,
            attempt in 0u32..64,
            jitter in 0.0f64..=1.0
        ) {
            let config = RetryConfig {
                initial_delay_ms: initial,
                max_delay_ms: initial + extra,
                jitter_factor: jitter,
                ..RetryConfig::default()
            };
            let cap = (initial + extra) as f64 * (1.0 + jitter);
            prop_assert!(config.delay_for_attempt(attempt).as_millis() as f64 <= cap + 1.0);
        }

        #[test]
        fn delay_without_jitter_is_monotonic(initial in 1u64..1_000, attempt in 0u32..20) {
            let config = RetryConfig {
                initial_delay_ms: initial,
                ..RetryConfig::default()
            }
            .without_jitter();
            prop_assert!(config.delay_for_attempt(attempt) <= config.delay_for_attempt(attempt + 1));
        }
    }
}
