//! Station ordering for display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::Station;

/// How to order a station list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Nearest first.
    #[default]
    Distance,
    /// Alphabetical by name.
    Name,
}

impl SortOrder {
    /// The other order.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Distance => SortOrder::Name,
            SortOrder::Name => SortOrder::Distance,
        }
    }
}

/// Sort stations for display.
///
/// By distance: ascending, with stations lacking a usable distance last.
/// By name: locale-style comparison, with unnamed stations treated as "".
/// Both sorts are stable, so ties keep their existing relative order.
pub fn sort_stations(mut stations: Vec<Station>, order: SortOrder) -> Vec<Station> {
    match order {
        SortOrder::Distance => stations.sort_by(|a, b| distance_key(a).total_cmp(&distance_key(b))),
        SortOrder::Name => stations.sort_by(|a, b| {
            compare_names(a.name().unwrap_or_default(), b.name().unwrap_or_default())
        }),
    }

    stations
}

fn distance_key(station: &Station) -> f64 {
    station.distance_km().unwrap_or(f64::INFINITY)
}

/// Compare names the way a user expects an alphabetical list to look:
/// case-insensitive first, then lowercase before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}
