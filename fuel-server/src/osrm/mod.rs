//! OSRM routing client.
//!
//! This module provides an HTTP client for an OSRM `route` service, used
//! in two ways:
//! - Distance-only lookups (`overview=false`) to refine station distances.
//!   Failures here are absorbed: the caller keeps its estimate.
//! - Full routes with geometry and turn-by-turn steps, requested when the
//!   user asks to see a route. Failures here are surfaced as `RouteError`.

mod client;
mod convert;
mod error;
mod types;

pub use client::{OsrmClient, OsrmConfig, RoutingProvider};
pub use convert::convert_route;
pub use error::RouteError;
pub use types::{OsrmGeometry, OsrmLeg, OsrmManeuver, OsrmResponse, OsrmRoute, OsrmStep};
