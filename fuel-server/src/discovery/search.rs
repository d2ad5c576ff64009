//! Station search: discovery, estimate ranking, refinement and filtering.

use tracing::{debug, info};

use crate::domain::{Distance, GeoPoint, Station};
use crate::osrm::RoutingProvider;
use crate::overpass::{FeatureSource, OverpassError, to_station};

use super::config::{ConfigError, SearchConfig};
use super::enrich::enrich;

/// Error from a station search.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The geographic data service could not be queried
    #[error("station data unavailable: {0}")]
    Unavailable(#[from] OverpassError),

    /// The search configuration is unusable
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// How the result set relates to the search radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Every returned station is within the radius.
    WithinRadius,
    /// No station was within the radius by road; the nearest candidates
    /// are returned anyway.
    NearestFallback,
    /// The data service returned no usable stations.
    NoneFound,
}

/// Result of a station search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Stations in ascending estimate order (the caller re-sorts for display).
    pub stations: Vec<Station>,

    pub status: SearchStatus,

    /// The radius the search was run with, in kilometres.
    pub radius_km: f64,
}

impl SearchOutcome {
    /// User-facing summary of the outcome.
    pub fn message(&self) -> String {
        let count = self.stations.len();
        let radius = self.radius_km;
        match self.status {
            SearchStatus::WithinRadius => {
                format!("Showing {count} stations within {radius} km (by road).")
            }
            SearchStatus::NearestFallback => format!(
                "No stations within {radius} km by road. Showing the {count} nearest \
                 (road distance may exceed the radius)."
            ),
            SearchStatus::NoneFound => format!("No fuel stations found within {radius} km."),
        }
    }
}

/// Station search over a feature source and a routing provider.
pub struct Discovery<'a, S: FeatureSource, R: RoutingProvider> {
    source: &'a S,
    router: &'a R,
    config: &'a SearchConfig,
}

impl<'a, S: FeatureSource, R: RoutingProvider> Discovery<'a, S, R> {
    /// Create a new search.
    pub fn new(source: &'a S, router: &'a R, config: &'a SearchConfig) -> Self {
        Self {
            source,
            router,
            config,
        }
    }

    /// Find fuel stations near `origin`.
    ///
    /// Candidates are ranked by straight-line distance and cut to
    /// `max_candidates` *before* driving distances are known. A station
    /// that is farther as the crow flies but nearer by road can therefore
    /// be cut; this bounds the number of routing calls.
    pub async fn find(&self, origin: GeoPoint) -> Result<SearchOutcome, DiscoveryError> {
        self.config.validate()?;

        let radius_km = self.config.radius_km();

        let elements = self
            .source
            .fuel_stations(origin, self.config.radius_m)
            .await?;

        let mut candidates: Vec<Station> = elements
            .iter()
            .filter_map(to_station)
            .map(|mut station| {
                station.distance = Some(Distance::estimate(origin.distance_km(&station.location)));
                station
            })
            .collect();

        let found = candidates.len();

        candidates.sort_by(|a, b| {
            let da = a.distance_km().unwrap_or(f64::INFINITY);
            let db = b.distance_km().unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        });
        candidates.truncate(self.config.max_candidates);

        debug!(
            elements = elements.len(),
            found,
            candidates = candidates.len(),
            "Candidates selected"
        );

        if candidates.is_empty() {
            info!(origin = %origin, radius_km, "No stations found");
            return Ok(SearchOutcome {
                stations: candidates,
                status: SearchStatus::NoneFound,
                radius_km,
            });
        }

        enrich(
            &mut candidates,
            origin,
            self.config.batch_size,
            self.config.inter_batch_delay,
            self.router,
        )
        .await;

        let within: Vec<Station> = candidates
            .iter()
            .filter(|s| s.distance_km().is_some_and(|km| km <= radius_km))
            .cloned()
            .collect();

        let outcome = if within.is_empty() {
            SearchOutcome {
                stations: candidates,
                status: SearchStatus::NearestFallback,
                radius_km,
            }
        } else {
            SearchOutcome {
                stations: within,
                status: SearchStatus::WithinRadius,
                radius_km,
            }
        };

        info!(
            origin = %origin,
            radius_km,
            status = ?outcome.status,
            stations = outcome.stations.len(),
            "Station search complete"
        );

        Ok(outcome)
    }
}
