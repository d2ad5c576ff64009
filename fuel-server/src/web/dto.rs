//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::discovery::{SearchConfig, SearchStatus, SortOrder};
use crate::domain::{DistanceSource, GeoPoint, Route, Station};
use crate::session::Results;

/// Route steps shown in the turn list.
pub const MAX_DISPLAYED_STEPS: usize = 10;

/// Format a distance in km for display, or "N/A" when unknown.
pub fn distance_text(km: Option<f64>) -> String {
    match km.filter(|k| k.is_finite()) {
        Some(km) => format!("{km:.2}"),
        None => "N/A".to_string(),
    }
}

/// Query for the station list.
#[derive(Debug, Deserialize)]
pub struct StationListQuery {
    /// Re-sort before returning (defaults to the current order)
    pub sort: Option<SortOrder>,
}

/// A station in a result list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Stable id, e.g. "node/123"
    pub id: String,

    /// Position in the list, starting at 1
    pub number: usize,

    pub name: String,
    pub brand: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Distance in km, if known
    pub distance_km: Option<f64>,

    /// Distance formatted for display ("1.23" or "N/A")
    pub distance_text: String,

    /// Whether the distance is a road distance or an estimate
    pub distance_source: Option<DistanceSource>,
}

impl StationResult {
    /// Create from a domain Station at list position `index` (0-based).
    pub fn from_station(station: &Station, index: usize) -> Self {
        Self {
            id: station.id.to_string(),
            number: index + 1,
            name: station.display_name().to_string(),
            brand: station.brand().to_string(),
            address: station.address().to_string(),
            latitude: station.location.latitude(),
            longitude: station.location.longitude(),
            distance_km: station.distance_km(),
            distance_text: distance_text(station.distance_km()),
            distance_source: station.distance.map(|d| d.source),
        }
    }
}

/// Current search results.
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub status: SearchStatus,
    pub message: String,
    pub radius_km: f64,
    pub sort: SortOrder,
    /// Time of the search, HH:MM:SS local time
    pub updated_at: String,
    pub stations: Vec<StationResult>,
}

impl ResultsResponse {
    pub fn from_results(results: &Results, sort: SortOrder) -> Self {
        Self {
            status: results.status,
            message: results.message.clone(),
            radius_km: results.radius_km,
            sort,
            updated_at: results.updated_at.format("%H:%M:%S").to_string(),
            stations: results
                .stations
                .iter()
                .enumerate()
                .map(|(i, s)| StationResult::from_station(s, i))
                .collect(),
        }
    }
}

/// Search settings as exposed to the page.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub radius_km: f64,
    pub max_stations: usize,
}

impl ConfigResponse {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            radius_km: config.radius_km(),
            max_stations: config.max_candidates,
        }
    }
}

/// Request to change search settings (slider input).
#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub radius_km: Option<f64>,
    pub max_stations: Option<usize>,
}

impl UpdateConfigRequest {
    /// The requested radius in whole metres, if one was given and usable.
    pub fn radius_m(&self) -> Result<Option<u32>, String> {
        match self.radius_km {
            None => Ok(None),
            Some(km) if km.is_finite() && km > 0.0 && km <= 100.0 => {
                Ok(Some((km * 1000.0).round() as u32))
            }
            Some(km) => Err(format!("radius must be between 0 and 100 km, got {km}")),
        }
    }
}

/// A known user location.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    /// Formatted for display, four decimals
    pub display: String,
}

impl LocationResponse {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
            display: point.to_string(),
        }
    }
}

/// Request for a route to a destination.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// A step in the turn list.
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub number: usize,
    pub instruction: String,
    pub distance_text: String,
}

/// A route ready to draw.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub distance_km: f64,
    /// Distance, two decimals
    pub distance_text: String,
    /// Duration rounded to whole minutes
    pub duration_minutes: i64,
    /// Path as `[latitude, longitude]` pairs
    pub geometry: Vec<[f64; 2]>,
    /// At most `MAX_DISPLAYED_STEPS` steps
    pub steps: Vec<StepResult>,
    pub message: String,
}

impl RouteResponse {
    pub fn from_route(route: &Route) -> Self {
        let distance = distance_text(Some(route.distance_km));
        let minutes = route.rounded_minutes();

        Self {
            distance_km: route.distance_km,
            distance_text: distance.clone(),
            duration_minutes: minutes,
            geometry: route
                .geometry
                .iter()
                .map(|p| [p.latitude(), p.longitude()])
                .collect(),
            steps: route
                .steps
                .iter()
                .take(MAX_DISPLAYED_STEPS)
                .enumerate()
                .map(|(i, step)| StepResult {
                    number: i + 1,
                    instruction: step.instruction.clone(),
                    distance_text: distance_text(Some(step.distance_km)),
                })
                .collect(),
            message: format!("Route found: {distance} km ({minutes} min)"),
        }
    }
}

/// Query for a navigation hand-off.
#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    pub lat: f64,
    pub lng: f64,
}

/// External navigation link.
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub url: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
