//! Overpass API client.
//!
//! Queries OpenStreetMap data for fuel amenities around a point. Stations
//! may be mapped as nodes (direct coordinates), or as ways and relations
//! (outlines); for the latter we request `out center` so Overpass returns
//! a representative centroid.

mod client;
mod convert;
mod error;
mod types;

pub use client::{FeatureSource, OverpassClient, OverpassConfig, build_query};
pub use convert::to_station;
pub use error::OverpassError;
pub use types::{Center, Element, OverpassResponse};
