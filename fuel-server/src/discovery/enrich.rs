//! Driving-distance refinement in paced batches.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, trace};

use crate::domain::{Distance, GeoPoint, Station};
use crate::osrm::RoutingProvider;

/// Counts from one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    /// Number of batches issued.
    pub batches: usize,
    /// Number of lookups issued.
    pub lookups: usize,
    /// Number of stations whose distance was replaced by a routed one.
    pub routed: usize,
}

/// Refine station distances with driving distances from `origin`.
///
/// Stations are processed in consecutive chunks of `batch_size`. All
/// lookups in a chunk run concurrently and the whole chunk is awaited
/// before results are applied in order. A successful lookup overwrites the
/// station's distance; a failed one leaves it untouched. Between chunks
/// (but not after the last) we sleep for `inter_batch_delay`.
///
/// Station order is preserved and no field other than `distance` changes.
/// Failed lookups are not retried.
pub async fn enrich<P: RoutingProvider>(
    stations: &mut [Station],
    origin: GeoPoint,
    batch_size: usize,
    inter_batch_delay: Duration,
    provider: &P,
) -> EnrichSummary {
    let mut summary = EnrichSummary::default();

    if stations.is_empty() {
        return summary;
    }

    let batch_size = batch_size.max(1);
    let batch_count = stations.len().div_ceil(batch_size);

    for (batch_idx, batch) in stations.chunks_mut(batch_size).enumerate() {
        let lookups: Vec<_> = batch
            .iter()
            .map(|station| provider.driving_distance_km(origin, station.location))
            .collect();

        let results = join_all(lookups).await;

        summary.batches += 1;
        summary.lookups += results.len();

        for (station, result) in batch.iter_mut().zip(results) {
            match result.filter(|km| km.is_finite()) {
                Some(km) => {
                    trace!(station = %station.id, km, "Routed distance");
                    station.distance = Some(Distance::routed(km));
                    summary.routed += 1;
                }
                None => {
                    trace!(station = %station.id, "Keeping estimate distance");
                }
            }
        }

        if batch_idx + 1 < batch_count && !inter_batch_delay.is_zero() {
            tokio::time::sleep(inter_batch_delay).await;
        }
    }

    debug!(
        batches = summary.batches,
        lookups = summary.lookups,
        routed = summary.routed,
        "Enrichment complete"
    );

    summary
}
