//! The browser geolocation boundary.
//!
//! Position acquisition happens in the browser. The page asks for a fresh,
//! high-accuracy fix using [`GeolocationOptions`] and reports back either
//! the coordinates or the failure kind as a [`LocationReport`].

use serde::{Deserialize, Serialize};

use crate::domain::{GeoPoint, InvalidGeoPoint};

/// Options passed to the browser's `getCurrentPosition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    /// Milliseconds before the browser gives up.
    pub timeout: u32,
    /// Maximum age of a cached position, in milliseconds. Zero forces a
    /// fresh fix.
    pub maximum_age: u32,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: 10_000,
            maximum_age: 0,
        }
    }
}

/// Why no location could be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Could not get your location. Please enable location permissions.")]
    PermissionDenied,

    #[error("Could not get your location. Location information unavailable.")]
    PositionUnavailable,

    #[error("Could not get your location. Location request timed out.")]
    Timeout,

    #[error("Geolocation is not supported by your browser.")]
    Unsupported,

    #[error("Could not get your location. {0}")]
    InvalidPosition(#[from] InvalidGeoPoint),
}

/// What the browser reported for a location request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationReport {
    Fix { latitude: f64, longitude: f64 },
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

impl LocationReport {
    /// Map a W3C `GeolocationPositionError.code` to a report.
    pub fn from_error_code(code: u16) -> Self {
        match code {
            1 => LocationReport::PermissionDenied,
            3 => LocationReport::Timeout,
            _ => LocationReport::PositionUnavailable,
        }
    }

    /// The reported position, or why there is none.
    pub fn resolve(&self) -> Result<GeoPoint, LocationError> {
        match *self {
            LocationReport::Fix {
                latitude,
                longitude,
            } => Ok(GeoPoint::new(latitude, longitude)?),
            LocationReport::PermissionDenied => Err(LocationError::PermissionDenied),
            LocationReport::PositionUnavailable => Err(LocationError::PositionUnavailable),
            LocationReport::Timeout => Err(LocationError::Timeout),
            LocationReport::Unsupported => Err(LocationError::Unsupported),
        }
    }
}
