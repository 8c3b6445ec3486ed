//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-axis tolerance used when comparing coordinates.
///
/// Provider-returned coordinates differ from user-entered ones in the last
/// few bits, so exact equality is never used for matching.
pub const COORDINATE_EPSILON: f64 = 0.00001;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both axes are strictly within [`COORDINATE_EPSILON`].
    ///
    /// Each axis is checked independently, so this is a square window rather
    /// than a radius.
    ///
    /// ```
    /// use errand_router::domain::Coordinate;
    ///
    /// let a = Coordinate::new(51.5, -0.12);
    /// assert!(a.approx_eq(&Coordinate::new(51.500_009, -0.120_009)));
    /// assert!(!a.approx_eq(&Coordinate::new(51.500_02, -0.12)));
    /// ```
    pub fn approx_eq(&self, other: &Coordinate) -> bool {
        (self.lat - other.lat).abs() < COORDINATE_EPSILON
            && (self.lng - other.lng).abs() < COORDINATE_EPSILON
    }

    /// Format as the `"lat,lng"` pair most directions APIs accept.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}
