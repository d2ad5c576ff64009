//! Driving routes.

use super::point::GeoPoint;

/// A single manoeuvre along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    /// Human-readable instruction, e.g. "Turn left onto Jalan Solo".
    pub instruction: String,
    /// Distance covered by this step, in kilometres.
    pub distance_km: f64,
}

/// A driving route from the user to a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub distance_km: f64,
    pub duration_minutes: f64,
    /// Path to draw, in travel order. Empty for distance-only lookups.
    pub geometry: Vec<GeoPoint>,
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Duration rounded to whole minutes, as shown to the user.
    pub fn rounded_minutes(&self) -> i64 {
        self.duration_minutes.round() as i64
    }
}
