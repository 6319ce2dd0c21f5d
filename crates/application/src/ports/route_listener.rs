//! Callback-style consumer of resolution outcomes

use domain::entities::{DestinationCandidate, ResolutionOutcome};
use domain::value_objects::GeoPoint;
#[cfg(test)]
use mockall::automock;

/// Receives exactly one callback per resolved request
#[cfg_attr(test, automock)]
pub trait RouteListener: Send + Sync {
    /// A route was calculated
    fn on_route_calculated(&self, points: &[GeoPoint], destination: GeoPoint, destination_name: &str);

    /// The request failed
    fn on_route_failed(&self, error_message: &str);

    /// Several destinations matched and one must be picked
    fn on_multiple_destinations_found(&self, candidates: &[DestinationCandidate]);
}

/// Invoke the listener callback matching `outcome`
pub fn notify_listener(listener: &dyn RouteListener, outcome: &ResolutionOutcome) {
    match outcome {
        ResolutionOutcome::Success(path) => listener.on_route_calculated(
            path.points(),
            path.destination(),
            path.destination_name(),
        ),
        ResolutionOutcome::Ambiguous(candidates) => {
            listener.on_multiple_destinations_found(candidates);
        },
        ResolutionOutcome::Failure(failure) => listener.on_route_failed(&failure.message),
    }
}

#[cfg(test)]
mod tests {
    use domain::entities::{ErrorKind, RoutePath};

    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lat, lng)
    }

    #[test]
    fn success_calls_route_calculated() {
        let destination = point(20.176, -98.054);
        let path = RoutePath::new(
            vec![point(20.17, -98.05), destination],
            point(20.17, -98.05),
            destination,
            "Plaza Principal",
        )
        .unwrap();

        let mut listener = MockRouteListener::new();
        listener
            .expect_on_route_calculated()
            .withf(|points, _, name| points.len() == 2 && name == "Plaza Principal")
            .times(1)
            .return_const(());
        listener.expect_on_route_failed().never();
        listener.expect_on_multiple_destinations_found().never();

        notify_listener(&listener, &ResolutionOutcome::Success(path));
    }

    #[test]
    fn failure_calls_route_failed_with_message() {
        let mut listener = MockRouteListener::new();
        listener
            .expect_on_route_failed()
            .withf(|message| message == "no route found")
            .times(1)
            .return_const(());
        listener.expect_on_route_calculated().never();

        notify_listener(
            &listener,
            &ResolutionOutcome::failure(ErrorKind::EmptyRoute, "no route found"),
        );
    }

    #[test]
    fn ambiguous_calls_multiple_destinations() {
        let candidates = vec![
            DestinationCandidate::new("Mercado Municipal", point(20.175, -98.052)),
            DestinationCandidate::new("Mercado Norte", point(20.19, -98.04)),
        ];

        let mut listener = MockRouteListener::new();
        listener
            .expect_on_multiple_destinations_found()
            .withf(|found| found.len() == 2 && found[0].display_name == "Mercado Municipal")
            .times(1)
            .return_const(());
        listener.expect_on_route_failed().never();

        notify_listener(&listener, &ResolutionOutcome::Ambiguous(candidates));
    }
}
