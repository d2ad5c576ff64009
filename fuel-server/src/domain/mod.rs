//! Domain types for the fuel station finder.
//!
//! These types represent validated geographic data. Points enforce their
//! coordinate ranges at construction time, so code that receives them can
//! trust their validity.

mod point;
mod route;
mod station;

pub use point::{EARTH_RADIUS_KM, GeoPoint, InvalidGeoPoint, distance_km};
pub use route::{Route, RouteStep};
pub use station::{
    Distance, DistanceSource, ElementKind, Station, StationId, UNKNOWN_ADDRESS, UNKNOWN_BRAND,
    UNNAMED_STATION,
};
