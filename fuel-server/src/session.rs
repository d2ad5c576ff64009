//! Per-user application state.
//!
//! Holds everything that changes in response to user actions: the search
//! settings, the last known location, the current result list, the sort
//! order and the route on display. The discovery and routing components
//! stay stateless; handlers read from and write to the session around them.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::RwLock;
use tracing::debug;

use crate::discovery::{ConfigError, SearchConfig, SearchOutcome, SearchStatus, SortOrder, sort_stations};
use crate::domain::{GeoPoint, Route, Station};

/// Handle for an issued route request.
///
/// Only the most recently issued ticket may install its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket(u64);

/// Handle for an issued search.
///
/// Only the most recently issued ticket may replace or clear the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// The current result list and how it was produced.
#[derive(Debug, Clone)]
pub struct Results {
    pub stations: Vec<Station>,
    pub status: SearchStatus,
    pub message: String,
    pub radius_km: f64,
    pub updated_at: DateTime<Local>,
}

#[derive(Debug, Default)]
struct Inner {
    config: SearchConfig,
    last_location: Option<GeoPoint>,
    results: Option<Results>,
    sort_order: SortOrder,
    active_route: Option<Route>,
    route_seq: u64,
    search_seq: u64,
}

/// Shared session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Inner>>,
}

impl Session {
    /// Create a session with the given search settings.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                config,
                ..Inner::default()
            })),
        }
    }

    /// Snapshot of the current search settings.
    pub async fn config(&self) -> SearchConfig {
        self.inner.read().await.config.clone()
    }

    /// Change the search radius and/or candidate limit.
    ///
    /// Takes effect from the next search. Rejected changes leave the
    /// settings untouched.
    pub async fn update_config(
        &self,
        radius_m: Option<u32>,
        max_candidates: Option<usize>,
    ) -> Result<SearchConfig, ConfigError> {
        let mut guard = self.inner.write().await;

        let mut updated = guard.config.clone();
        if let Some(radius_m) = radius_m {
            updated.radius_m = radius_m;
        }
        if let Some(max) = max_candidates {
            updated.max_candidates = max;
        }
        updated.validate()?;

        guard.config = updated.clone();
        Ok(updated)
    }

    pub async fn record_location(&self, location: GeoPoint) {
        self.inner.write().await.last_location = Some(location);
    }

    pub async fn last_location(&self) -> Option<GeoPoint> {
        self.inner.read().await.last_location
    }

    /// Start a new search. Results of any search still in flight will be
    /// discarded.
    pub async fn begin_search(&self) -> SearchTicket {
        let mut guard = self.inner.write().await;
        guard.search_seq += 1;
        SearchTicket(guard.search_seq)
    }

    /// Replace the result list with a new search outcome, sorted by the
    /// current order.
    ///
    /// Returns `None` (and leaves the results alone) when a newer search
    /// has been issued since `ticket`.
    pub async fn replace_results(
        &self,
        ticket: SearchTicket,
        outcome: SearchOutcome,
    ) -> Option<Results> {
        let mut guard = self.inner.write().await;
        if ticket.0 != guard.search_seq {
            debug!(
                ticket = ticket.0,
                latest = guard.search_seq,
                "Discarding stale search results"
            );
            return None;
        }

        let message = outcome.message();
        let results = Results {
            stations: sort_stations(outcome.stations, guard.sort_order),
            status: outcome.status,
            message,
            radius_km: outcome.radius_km,
            updated_at: Local::now(),
        };

        guard.results = Some(results.clone());
        Some(results)
    }

    /// Drop the result list after a failed search.
    ///
    /// Returns `false` (and keeps the results) when a newer search has been
    /// issued since `ticket`.
    pub async fn clear_results(&self, ticket: SearchTicket) -> bool {
        let mut guard = self.inner.write().await;
        if ticket.0 != guard.search_seq {
            return false;
        }
        guard.results = None;
        true
    }

    pub async fn results(&self) -> Option<Results> {
        self.inner.read().await.results.clone()
    }

    pub async fn sort_order(&self) -> SortOrder {
        self.inner.read().await.sort_order
    }

    /// Set the sort order and re-sort the current results.
    pub async fn set_sort_order(&self, order: SortOrder) -> Option<Results> {
        let mut guard = self.inner.write().await;
        guard.sort_order = order;

        let results = guard.results.as_mut()?;
        let stations = std::mem::take(&mut results.stations);
        results.stations = sort_stations(stations, order);
        Some(results.clone())
    }

    /// Start a new route request.
    ///
    /// Clears the displayed route before the request is issued and returns
    /// the ticket the response must present to be shown.
    pub async fn begin_route(&self) -> RouteTicket {
        let mut guard = self.inner.write().await;
        guard.active_route = None;
        guard.route_seq += 1;
        RouteTicket(guard.route_seq)
    }

    /// Install a route if its ticket is still the latest.
    ///
    /// Returns `false` (and discards the route) when a newer request has
    /// been issued since.
    pub async fn finish_route(&self, ticket: RouteTicket, route: Route) -> bool {
        let mut guard = self.inner.write().await;
        if ticket.0 != guard.route_seq {
            debug!(
                ticket = ticket.0,
                latest = guard.route_seq,
                "Discarding stale route response"
            );
            return false;
        }
        guard.active_route = Some(route);
        true
    }

    /// Whether `ticket` is still the latest issued.
    pub async fn is_current(&self, ticket: RouteTicket) -> bool {
        self.inner.read().await.route_seq == ticket.0
    }

    pub async fn active_route(&self) -> Option<Route> {
        self.inner.read().await.active_route.clone()
    }

    /// Remove the displayed route. In-flight requests are invalidated too.
    pub async fn clear_route(&self) {
        let mut guard = self.inner.write().await;
        guard.active_route = None;
        guard.route_seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Distance, ElementKind, StationId};
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn route(km: f64) -> Route {
        Route {
            origin: p(0.0, 0.0),
            destination: p(0.0, 0.01),
            distance_km: km,
            duration_minutes: 3.0,
            geometry: vec![],
            steps: vec![],
        }
    }

    fn station(id: u64, name: &str, km: f64) -> Station {
        let mut s = Station::new(
            StationId::new(ElementKind::Node, id),
            p(0.0, 0.0),
            BTreeMap::from([("name".to_string(), name.to_string())]),
        );
        s.distance = Some(Distance::routed(km));
        s
    }

    async fn replace(session: &Session, stations: Vec<Station>) -> Results {
        let ticket = session.begin_search().await;
        session
            .replace_results(ticket, outcome(stations))
            .await
            .unwrap()
    }

    fn outcome(stations: Vec<Station>) -> SearchOutcome {
        SearchOutcome {
            stations,
            status: SearchStatus::WithinRadius,
            radius_km: 2.0,
        }
    }

    #[tokio::test]
    async fn stale_route_is_discarded() {
        let session = Session::default();

        let first = session.begin_route().await;
        let second = session.begin_route().await;

        // The older response arrives last and must not win.
        assert!(session.finish_route(second, route(2.0)).await);
        assert!(!session.finish_route(first, route(9.0)).await);

        assert_eq!(session.active_route().await.unwrap().distance_km, 2.0);
    }

    #[tokio::test]
    async fn begin_route_clears_previous() {
        let session = Session::default();

        let ticket = session.begin_route().await;
        assert!(session.finish_route(ticket, route(1.0)).await);
        assert!(session.active_route().await.is_some());

        let _next = session.begin_route().await;
        assert!(session.active_route().await.is_none());
    }

    #[tokio::test]
    async fn clear_route_invalidates_in_flight() {
        let session = Session::default();

        let ticket = session.begin_route().await;
        session.clear_route().await;

        assert!(!session.is_current(ticket).await);
        assert!(!session.finish_route(ticket, route(1.0)).await);
        assert!(session.active_route().await.is_none());
    }

    #[tokio::test]
    async fn results_follow_sort_order() {
        let session = Session::default();

        let results = replace(
            &session,
            vec![station(1, "Shell", 1.5), station(2, "Amber", 0.8)],
        )
        .await;
        let ids: Vec<u64> = results.stations.iter().map(|s| s.id.osm_id).collect();
        assert_eq!(ids, vec![2, 1]);

        let resorted = session.set_sort_order(SortOrder::Name).await.unwrap();
        assert_eq!(session.sort_order().await, SortOrder::Name);
        let names: Vec<String> = resorted
            .stations
            .iter()
            .map(|s| s.display_name().to_string())
            .collect();
        assert_eq!(names, vec!["Amber", "Shell"]);
    }

    #[tokio::test]
    async fn new_results_replace_old() {
        let session = Session::default();

        replace(&session, vec![station(1, "A", 1.0), station(2, "B", 1.2)]).await;
        replace(&session, vec![station(3, "C", 0.4)]).await;

        let results = session.results().await.unwrap();
        let ids: Vec<u64> = results.stations.iter().map(|s| s.id.osm_id).collect();
        assert_eq!(ids, vec![3]);

        let ticket = session.begin_search().await;
        assert!(session.clear_results(ticket).await);
        assert!(session.results().await.is_none());
    }

    #[tokio::test]
    async fn stale_search_does_not_overwrite_newer() {
        let session = Session::default();

        let older = session.begin_search().await;
        let newer = session.begin_search().await;

        assert!(
            session
                .replace_results(newer, outcome(vec![station(2, "B", 0.5)]))
                .await
                .is_some()
        );
        // The older search finishes last, successfully or not.
        assert!(
            session
                .replace_results(older, outcome(vec![station(1, "A", 1.0)]))
                .await
                .is_none()
        );
        assert!(!session.clear_results(older).await);

        let ids: Vec<u64> = session
            .results()
            .await
            .unwrap()
            .stations
            .iter()
            .map(|s| s.id.osm_id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn config_updates_are_validated() {
        let session = Session::new(SearchConfig::default());

        let updated = session.update_config(Some(5000), Some(10)).await.unwrap();
        assert_eq!(updated.radius_m, 5000);
        assert_eq!(updated.max_candidates, 10);
        assert_eq!(updated.inter_batch_delay, Duration::from_millis(150));

        assert!(session.update_config(Some(0), None).await.is_err());
        assert_eq!(session.config().await.radius_m, 5000);
    }

    #[tokio::test]
    async fn remembers_location() {
        let session = Session::default();
        assert!(session.last_location().await.is_none());

        session.record_location(p(-7.79, 110.37)).await;
        assert_eq!(session.last_location().await, Some(p(-7.79, 110.37)));
    }
}
