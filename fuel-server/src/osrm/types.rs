//! OSRM `route` service response DTOs.
//!
//! Only the fields we use are modelled. `geometry` is present only when
//! the request asks for an overview, and `steps` only with `steps=true`.

use serde::Deserialize;

/// Response from `/route/v1/driving/...`.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmResponse {
    /// "Ok" on success; otherwise an error code such as "NoRoute".
    pub code: String,

    /// Error detail accompanying a non-"Ok" code.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// A route between the requested waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Distance in metres.
    pub distance: Option<f64>,

    /// Duration in seconds.
    pub duration: Option<f64>,

    /// GeoJSON LineString (with `geometries=geojson`).
    pub geometry: Option<OsrmGeometry>,

    #[serde(default)]
    pub legs: Vec<OsrmLeg>,
}

/// GeoJSON geometry; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

/// One leg between consecutive waypoints.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmLeg {
    #[serde(default)]
    pub steps: Vec<OsrmStep>,
}

/// A routing step.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmStep {
    /// Distance in metres.
    #[serde(default)]
    pub distance: f64,

    /// Road name, often empty.
    #[serde(default)]
    pub name: String,

    pub maneuver: OsrmManeuver,
}

/// The manoeuvre at the start of a step.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmManeuver {
    /// e.g. "depart", "turn", "roundabout", "arrive".
    #[serde(rename = "type")]
    pub kind: String,

    /// e.g. "left", "slight right".
    pub modifier: Option<String>,

    /// Pre-rendered instruction, provided by some OSRM deployments.
    pub instruction: Option<String>,
}
