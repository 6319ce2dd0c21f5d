//! Human-readable rendering of resolution outcomes

use application::RouteListener;
use domain::{DestinationCandidate, GeoPoint};

/// Listener that writes a short summary of each outcome to stderr
#[derive(Debug, Default)]
pub struct ConsoleListener;

impl RouteListener for ConsoleListener {
    fn on_route_calculated(&self, points: &[GeoPoint], destination: GeoPoint, destination_name: &str) {
        eprintln!("🗺️  Route to {destination_name} ({destination})");
        eprintln!("   {} points", points.len());
    }

    fn on_route_failed(&self, error_message: &str) {
        eprintln!("❌ {error_message}");
    }

    fn on_multiple_destinations_found(&self, candidates: &[DestinationCandidate]) {
        eprintln!("🔎 Several destinations match, pick one with --pick:");
        for (index, candidate) in candidates.iter().enumerate() {
            eprintln!("   {}. {} ({})", index + 1, candidate.display_name, candidate.location);
        }
    }
}
