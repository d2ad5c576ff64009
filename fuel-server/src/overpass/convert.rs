//! Conversion from Overpass elements to domain stations.

use tracing::debug;

use crate::domain::{ElementKind, GeoPoint, Station, StationId};

use super::types::Element;

/// Resolve an element to a station.
///
/// Nodes use their own coordinates; ways and relations use their centroid.
/// Returns `None` when no valid coordinates can be resolved. The returned
/// station has no distance yet.
pub fn to_station(element: &Element) -> Option<Station> {
    let kind = match element.kind.as_str() {
        "node" => ElementKind::Node,
        "way" => ElementKind::Way,
        "relation" => ElementKind::Relation,
        other => {
            debug!(kind = other, id = element.id, "Skipping unknown element type");
            return None;
        }
    };

    let (lat, lon) = match kind {
        ElementKind::Node => (element.lat?, element.lon?),
        ElementKind::Way | ElementKind::Relation => {
            let center = element.center?;
            (center.lat, center.lon)
        }
    };

    let location = match GeoPoint::new(lat, lon) {
        Ok(p) => p,
        Err(e) => {
            debug!(id = element.id, error = %e, "Skipping element with invalid coordinates");
            return None;
        }
    };

    Some(Station::new(
        StationId::new(kind, element.id),
        location,
        element.tags.clone(),
    ))
}
