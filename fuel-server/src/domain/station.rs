//! Fuel station types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::point::GeoPoint;

/// The OSM element kind a station was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A point feature with direct coordinates.
    Node,
    /// An area or line; represented by its centroid.
    Way,
    /// A multipolygon or grouping; represented by its centroid.
    Relation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }
}

/// Identifies a station by its OSM element kind and id.
///
/// OSM ids are only unique within a kind, so both are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId {
    pub kind: ElementKind,
    pub osm_id: u64,
}

impl StationId {
    pub fn new(kind: ElementKind, osm_id: u64) -> Self {
        Self { kind, osm_id }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_str(), self.osm_id)
    }
}

impl Serialize for StationId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a station's distance value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSource {
    /// Great-circle estimate from the search origin.
    Estimate,
    /// Driving distance reported by the routing service.
    Routed,
}

/// A distance from the search origin, tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    pub km: f64,
    pub source: DistanceSource,
}

impl Distance {
    pub fn estimate(km: f64) -> Self {
        Self {
            km,
            source: DistanceSource::Estimate,
        }
    }

    pub fn routed(km: f64) -> Self {
        Self {
            km,
            source: DistanceSource::Routed,
        }
    }
}

/// Fallback shown when a station has no `name` tag.
pub const UNNAMED_STATION: &str = "Unnamed Gas Station";

/// Fallback shown when neither `brand` nor `operator` is tagged.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Fallback shown when no address tag is present.
pub const UNKNOWN_ADDRESS: &str = "Address unavailable";

/// A fuel station found by a search.
///
/// `distance` holds at most one value: the estimate until the routing
/// service refines it, after which the routed value replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub location: GeoPoint,
    pub tags: BTreeMap<String, String>,
    pub distance: Option<Distance>,
}

impl Station {
    /// Create a station with no distance yet.
    pub fn new(id: StationId, location: GeoPoint, tags: BTreeMap<String, String>) -> Self {
        Self {
            id,
            location,
            tags,
            distance: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.id.kind
    }

    /// The raw `name` tag, if any.
    pub fn name(&self) -> Option<&str> {
        self.tag("name")
    }

    /// Name for display, with a placeholder for unnamed stations.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNNAMED_STATION)
    }

    /// Brand, falling back to operator.
    pub fn brand(&self) -> &str {
        self.tag("brand")
            .or_else(|| self.tag("operator"))
            .unwrap_or(UNKNOWN_BRAND)
    }

    /// Street address, falling back to a free-form `address` tag.
    pub fn address(&self) -> &str {
        self.tag("addr:street")
            .or_else(|| self.tag("address"))
            .unwrap_or(UNKNOWN_ADDRESS)
    }

    /// Current distance in kilometres, if one is known and usable.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance.map(|d| d.km).filter(|km| km.is_finite())
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
