//! OSRM HTTP client.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{GeoPoint, Route};

use super::convert::convert_route;
use super::error::RouteError;
use super::types::OsrmResponse;

/// Default base URL: the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// OSRM codes meaning the request was fine but no route exists.
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// Provider of driving distances between two points.
///
/// A lookup never fails loudly: any problem yields `None` so that callers
/// can fall back to an estimate.
pub trait RoutingProvider {
    /// Driving distance in kilometres, or `None` if it could not be found.
    fn driving_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = Option<f64>> + Send;
}

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server
    pub base_url: String,
    /// Routing profile segment of the URL
    pub profile: String,
    /// Request timeout
    pub timeout: Duration,
}

impl OsrmConfig {
    /// Create a config pointing at the public OSRM demo server.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom base URL (for testing or a self-hosted server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// OSRM route service client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RouteError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fuel-server/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
        })
    }

    fn route_url(&self, origin: GeoPoint, destination: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            self.profile,
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude()
        )
    }

    /// Issue a route request and decode the body.
    async fn request(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        params: &[(&str, &str)],
    ) -> Result<OsrmResponse, RouteError> {
        let url = self.route_url(origin, destination);

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // OSRM reports "NoRoute" with a 400 status, so the body is
        // inspected before the status.
        let parsed: Result<OsrmResponse, _> = serde_json::from_str(&body);

        if let Ok(ref r) = parsed
            && NO_ROUTE_CODES.contains(&r.code.as_str())
        {
            return Err(RouteError::NoRouteFound);
        }

        if !status.is_success() {
            let message = match parsed {
                Ok(r) => r.message.unwrap_or(r.code),
                Err(_) => body.chars().take(500).collect(),
            };
            return Err(RouteError::ServiceUnavailable {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed.map_err(|e| RouteError::InvalidResponse {
            message: e.to_string(),
        })?;

        if parsed.code != "Ok" {
            return Err(RouteError::ServiceUnavailable {
                status: status.as_u16(),
                message: parsed.message.unwrap_or(parsed.code),
            });
        }

        Ok(parsed)
    }

    /// Driving distance between two points, in kilometres.
    ///
    /// Requests no geometry. Returns an error on any failure; see
    /// [`RoutingProvider::driving_distance_km`] for the absorbing variant.
    pub async fn fetch_distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<f64, RouteError> {
        let response = self
            .request(origin, destination, &[("overview", "false")])
            .await?;

        response
            .routes
            .first()
            .ok_or(RouteError::NoRouteFound)?
            .distance
            .filter(|d| d.is_finite())
            .map(|metres| metres / 1000.0)
            .ok_or_else(|| RouteError::InvalidResponse {
                message: "route has no distance".to_string(),
            })
    }

    /// Full route with geometry and turn-by-turn steps.
    pub async fn full_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Route, RouteError> {
        let response = self
            .request(
                origin,
                destination,
                &[
                    ("overview", "full"),
                    ("geometries", "geojson"),
                    ("steps", "true"),
                ],
            )
            .await?;

        let route = response.routes.first().ok_or(RouteError::NoRouteFound)?;
        let route = convert_route(route, origin, destination)?;

        debug!(
            destination = %destination,
            distance_km = route.distance_km,
            steps = route.steps.len(),
            "Full route fetched"
        );

        Ok(route)
    }
}

impl RoutingProvider for OsrmClient {
    async fn driving_distance_km(&self, origin: GeoPoint, destination: GeoPoint) -> Option<f64> {
        match self.fetch_distance_km(origin, destination).await {
            Ok(km) => Some(km),
            Err(e) => {
                warn!(destination = %destination, error = %e, "Driving distance lookup failed");
                None
            }
        }
    }
}
