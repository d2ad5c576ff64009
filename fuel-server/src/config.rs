//! Server configuration from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::discovery::SearchConfig;
use crate::osrm::OsrmConfig;
use crate::overpass::OverpassConfig;

/// Error reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub overpass: OverpassConfig,
    pub osrm: OsrmConfig,
    /// Initial search settings; users can change radius and limit later.
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from `FUEL_*` environment variables.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset keys take their defaults; set but unparsable keys are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerConfigError> {
        let bind_addr = parse_or(&lookup, "FUEL_BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?;
        let timeout = Duration::from_secs(parse_or(&lookup, "FUEL_HTTP_TIMEOUT_SECS", 30u64)?);
        let static_dir = lookup("FUEL_STATIC_DIR").unwrap_or_else(|| "static".to_string());

        let mut overpass = OverpassConfig::new().with_timeout(timeout);
        if let Some(url) = lookup("FUEL_OVERPASS_URL") {
            overpass = overpass.with_base_url(url);
        }

        let mut osrm = OsrmConfig::new().with_timeout(timeout);
        if let Some(url) = lookup("FUEL_OSRM_URL") {
            osrm = osrm.with_base_url(url);
        }

        let defaults = SearchConfig::default();
        let search = SearchConfig::new(
            parse_or(&lookup, "FUEL_SEARCH_RADIUS_M", defaults.radius_m)?,
            parse_or(&lookup, "FUEL_MAX_STATIONS", defaults.max_candidates)?,
            parse_or(&lookup, "FUEL_BATCH_SIZE", defaults.batch_size)?,
            Duration::from_millis(parse_or(
                &lookup,
                "FUEL_BATCH_DELAY_MS",
                defaults.inter_batch_delay.as_millis() as u64,
            )?),
        );
        search.validate().map_err(|e| ServerConfigError::Invalid {
            key: "FUEL_SEARCH_*",
            value: format!("{search:?}"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            bind_addr,
            static_dir,
            overpass,
            osrm,
            search,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ServerConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ServerConfigError::Invalid {
                key,
                value,
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.osrm.timeout, Duration::from_secs(30));
        assert_eq!(config.overpass.base_url, OverpassConfig::new().base_url);
    }

    #[test]
    fn overrides_from_environment() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("FUEL_BIND_ADDR", "0.0.0.0:8080"),
            ("FUEL_OSRM_URL", "http://osrm:5000"),
            ("FUEL_OVERPASS_URL", "http://overpass/api/interpreter"),
            ("FUEL_HTTP_TIMEOUT_SECS", "5"),
            ("FUEL_SEARCH_RADIUS_M", "3000"),
            ("FUEL_MAX_STATIONS", "12"),
            ("FUEL_BATCH_SIZE", "4"),
            ("FUEL_BATCH_DELAY_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.osrm.base_url, "http://osrm:5000");
        assert_eq!(config.overpass.base_url, "http://overpass/api/interpreter");
        assert_eq!(config.overpass.timeout, Duration::from_secs(5));
        assert_eq!(
            config.search,
            SearchConfig::new(3000, 12, 4, Duration::ZERO)
        );
    }

    #[test]
    fn unparsable_value_is_error() {
        let err = ServerConfig::from_lookup(lookup(&[("FUEL_MAX_STATIONS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("FUEL_MAX_STATIONS"));
    }

    #[test]
    fn zero_batch_size_is_error() {
        assert!(ServerConfig::from_lookup(lookup(&[("FUEL_BATCH_SIZE", "0")])).is_err());
    }
}
