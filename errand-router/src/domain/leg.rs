//! Route legs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// How a leg is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walk,
    Transit,
}

impl TravelMode {
    /// Mode name as used in directions API queries.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            TravelMode::Walk => "walking",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Walk => f.write_str("walk"),
            TravelMode::Transit => f.write_str("transit"),
        }
    }
}

/// A single origin-to-destination unit of a route.
///
/// Legs are derived from consecutive stops and identified by their position
/// in the planned sequence; they are not stored on their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
}

impl Leg {
    /// Create a leg.
    pub const fn new(origin: Coordinate, destination: Coordinate, mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            mode,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.origin, self.destination, self.mode)
    }
}
