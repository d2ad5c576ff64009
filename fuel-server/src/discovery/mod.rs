//! Station discovery and distance ranking.
//!
//! This module implements the search pipeline that answers: "which fuel
//! stations are nearest to me by road?"
//!
//! Candidates come from Overpass and are first ranked by great-circle
//! distance. Only the nearest few are refined with driving distances from
//! the routing service, in small paced batches, before the radius filter
//! is applied.

mod config;
mod enrich;
mod order;
mod search;


pub use config::{ConfigError, SearchConfig};
pub use enrich::{EnrichSummary, enrich};
pub use order::{SortOrder, sort_stations};
pub use search::{Discovery, DiscoveryError, SearchOutcome, SearchStatus};
