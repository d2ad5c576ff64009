//! Google Maps directions URL generation.
//!
//! The "navigate" action hands the user off to Google Maps for turn-by-turn
//! guidance on their device.

use crate::domain::GeoPoint;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Generate a Google Maps directions URL to `destination`.
///
/// When the user's location is known it is passed as the origin;
/// otherwise Google Maps uses the device's own location.
///
/// # Example
///
/// ```ignore
/// let url = directions_url(station, Some(user));
/// // Returns: "https://www.google.com/maps/dir/?api=1&destination=-7.8,110.4&origin=-7.79,110.37"
/// ```
pub fn directions_url(destination: GeoPoint, origin: Option<GeoPoint>) -> String {
    let mut url = format!(
        "{}&destination={},{}",
        DIRECTIONS_URL,
        destination.latitude(),
        destination.longitude()
    );

    if let Some(origin) = origin {
        url.push_str(&format!(
            "&origin={},{}",
            origin.latitude(),
            origin.longitude()
        ));
    }

    url
}
