//! Overpass API response DTOs.
//!
//! These map directly to Overpass JSON output (`[out:json]`). Fields are
//! optional because their presence depends on the element type and on the
//! `out` mode of the query.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    /// Matching elements. Absent when nothing matched on some servers.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single OSM element.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    /// "node", "way" or "relation".
    #[serde(rename = "type")]
    pub kind: String,

    /// OSM id, unique per element type.
    pub id: u64,

    /// Latitude (nodes only).
    pub lat: Option<f64>,

    /// Longitude (nodes only).
    pub lon: Option<f64>,

    /// Centroid (ways and relations, with `out center`).
    pub center: Option<Center>,

    /// OSM tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Centroid of a way or relation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}
