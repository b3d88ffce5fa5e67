use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The two fixed coordinates every listing is measured against.
///
/// Passed to the distance resolver at construction rather than read from a
/// global, so tests can substitute synthetic points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferencePoints {
    /// Parramatta train station
    pub station: GeoPoint,
    /// Parramatta Park (main gate)
    pub park: GeoPoint,
}

impl Default for ReferencePoints {
    fn default() -> Self {
        Self {
            station: GeoPoint::new(-33.8178, 151.0035),
            park: GeoPoint::new(-33.8145, 151.0024),
        }
    }
}
