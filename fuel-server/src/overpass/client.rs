//! Overpass API HTTP client.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::domain::GeoPoint;

use super::error::OverpassError;
use super::types::{Element, OverpassResponse};

/// Default Overpass interpreter endpoint.
const DEFAULT_BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Server-side query timeout requested in the query header, in seconds.
const DEFAULT_QUERY_TIMEOUT_SECS: u32 = 25;

/// Source of raw fuel-amenity features around a point.
///
/// This abstraction allows station discovery to be tested with mock data.
pub trait FeatureSource {
    /// Fetch fuel amenities (nodes, ways and relations) within
    /// `radius_m` metres of `origin`.
    fn fuel_stations(
        &self,
        origin: GeoPoint,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<Element>, OverpassError>> + Send;
}

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint URL
    pub base_url: String,
    /// Client-side request timeout
    pub timeout: Duration,
    /// Timeout passed to Overpass in the query itself
    pub query_timeout_secs: u32,
}

impl OverpassConfig {
    /// Create a config pointing at the public Overpass instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint (for testing or a private instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the client-side request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the Overpass QL query for fuel amenities around a point.
pub fn build_query(origin: GeoPoint, radius_m: u32, query_timeout_secs: u32) -> String {
    let around = format!(
        "(around:{},{},{})",
        radius_m,
        origin.latitude(),
        origin.longitude()
    );

    format!(
        "[out:json][timeout:{query_timeout_secs}];\n\
         (\n  \
         node[\"amenity\"=\"fuel\"]{around};\n  \
         way[\"amenity\"=\"fuel\"]{around};\n  \
         relation[\"amenity\"=\"fuel\"]{around};\n\
         );\n\
         out center;"
    )
}

/// Client for the Overpass API.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    base_url: String,
    query_timeout_secs: u32,
}

impl OverpassClient {
    /// Create a new Overpass client.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fuel-server/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            query_timeout_secs: config.query_timeout_secs,
        })
    }

    /// Fetch fuel amenity elements within `radius_m` of `origin`.
    pub async fn fetch_fuel_elements(
        &self,
        origin: GeoPoint,
        radius_m: u32,
    ) -> Result<Vec<Element>, OverpassError> {
        let query = build_query(origin, radius_m, self.query_timeout_secs);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Json {
                message: e.to_string(),
            })?;

        debug!(
            origin = %origin,
            radius_m,
            elements = parsed.elements.len(),
            "Overpass query complete"
        );

        Ok(parsed.elements)
    }
}

impl FeatureSource for OverpassClient {
    async fn fuel_stations(
        &self,
        origin: GeoPoint,
        radius_m: u32,
    ) -> Result<Vec<Element>, OverpassError> {
        self.fetch_fuel_elements(origin, radius_m).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OverpassConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.query_timeout_secs, 25);
    }

    #[test]
    fn config_builder() {
        let config = OverpassConfig::new()
            .with_base_url("http://localhost:8080/api/interpreter")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:8080/api/interpreter");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn query_covers_all_element_kinds() {
        let origin = GeoPoint::new(-7.797068, 110.370529).unwrap();
        let query = build_query(origin, 2000, 25);

        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains("node[\"amenity\"=\"fuel\"](around:2000,-7.797068,110.370529);"));
        assert!(query.contains("way[\"amenity\"=\"fuel\"](around:2000,-7.797068,110.370529);"));
        assert!(
            query.contains("relation[\"amenity\"=\"fuel\"](around:2000,-7.797068,110.370529);")
        );
        assert!(query.trim_end().ends_with("out center;"));
    }

    #[test]
    fn client_creation() {
        assert!(OverpassClient::new(OverpassConfig::new()).is_ok());
    }
}
