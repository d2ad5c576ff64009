//! Search configuration for station discovery.

use std::time::Duration;

/// Error returned for an unusable search configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid search config: {0}")]
pub struct ConfigError(pub &'static str);

/// Configuration parameters for a station search.
///
/// Read once at the start of each search; changes made while a search is
/// running apply to the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Search radius around the user, in metres.
    /// Also the post-refinement driving-distance cut-off.
    pub radius_m: u32,

    /// Maximum number of candidates to refine with the routing service.
    /// Candidates beyond this (by straight-line distance) are discarded.
    pub max_candidates: usize,

    /// Number of routing lookups issued concurrently per batch.
    pub batch_size: usize,

    /// Pause between batches, to stay polite with the routing service.
    pub inter_batch_delay: Duration,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        radius_m: u32,
        max_candidates: usize,
        batch_size: usize,
        inter_batch_delay: Duration,
    ) -> Self {
        Self {
            radius_m,
            max_candidates,
            batch_size,
            inter_batch_delay,
        }
    }

    /// Returns the search radius in kilometres.
    pub fn radius_km(&self) -> f64 {
        f64::from(self.radius_m) / 1000.0
    }

    /// Check that all limits are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius_m == 0 {
            return Err(ConfigError("radius must be positive"));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError("max candidates must be positive"));
        }
        if self.batch_size == 0 {
            return Err(ConfigError("batch size must be positive"));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: 2000,
            max_candidates: 20,
            batch_size: 5,
            inter_batch_delay: Duration::from_millis(150),
        }
    }
}
