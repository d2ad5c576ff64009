//! Conversion from OSRM DTOs to domain routes.

use crate::domain::{GeoPoint, Route, RouteStep};

use super::error::RouteError;
use super::types::{OsrmManeuver, OsrmRoute, OsrmStep};

/// Convert an OSRM route into a domain `Route`.
///
/// Distance and duration are required; geometry and steps are taken when
/// present. Coordinate pairs that are not valid points are skipped.
pub fn convert_route(
    route: &OsrmRoute,
    origin: GeoPoint,
    destination: GeoPoint,
) -> Result<Route, RouteError> {
    let distance_m = route
        .distance
        .filter(|d| d.is_finite())
        .ok_or_else(|| RouteError::InvalidResponse {
            message: "route has no distance".to_string(),
        })?;

    let duration_s = route
        .duration
        .filter(|d| d.is_finite())
        .ok_or_else(|| RouteError::InvalidResponse {
            message: "route has no duration".to_string(),
        })?;

    let geometry = route
        .geometry
        .as_ref()
        .map(|g| {
            g.coordinates
                .iter()
                .filter_map(|[lng, lat]| GeoPoint::new(*lat, *lng).ok())
                .collect()
        })
        .unwrap_or_default();

    let steps = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(convert_step)
        .collect();

    Ok(Route {
        origin,
        destination,
        distance_km: distance_m / 1000.0,
        duration_minutes: duration_s / 60.0,
        geometry,
        steps,
    })
}

fn convert_step(step: &OsrmStep) -> RouteStep {
    let instruction = step
        .maneuver
        .instruction
        .clone()
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| describe_maneuver(&step.maneuver, &step.name));

    RouteStep {
        instruction,
        distance_km: step.distance / 1000.0,
    }
}

/// Render a plain-English instruction for a manoeuvre.
fn describe_maneuver(maneuver: &OsrmManeuver, road: &str) -> String {
    let modifier = maneuver.modifier.as_deref();

    let action = match (maneuver.kind.as_str(), modifier) {
        ("depart", _) => "Depart".to_string(),
        ("arrive", _) => return "Arrive at destination".to_string(),
        ("roundabout" | "rotary", _) => "Enter the roundabout".to_string(),
        ("continue" | "new name", Some("straight") | None) => "Continue straight".to_string(),
        ("merge", _) => "Merge".to_string(),
        ("fork", Some(m)) => format!("Keep {m} at the fork"),
        ("end of road", Some(m)) => format!("At the end of the road, turn {m}"),
        ("on ramp", _) => "Take the ramp".to_string(),
        ("off ramp", _) => "Take the exit".to_string(),
        ("uturn", _) | (_, Some("uturn")) => "Make a U-turn".to_string(),
        (_, Some("straight")) => "Continue straight".to_string(),
        (_, Some(m)) => format!("Turn {m}"),
        (kind, None) => capitalize(kind),
    };

    if road.is_empty() {
        action
    } else {
        format!("{action} onto {road}")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
