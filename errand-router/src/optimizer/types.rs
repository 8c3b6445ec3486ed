//! Optimizer wire types.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RouteStop};

use super::error::OptimizerError;

/// Which solver the optimizer should run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Visit every waypoint
    #[default]
    Tsp,
    /// Visit one waypoint per group
    Gtsp,
}

/// A candidate location, tagged with the errand group it can satisfy.
///
/// Group 0 is the origin; errand groups are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
    pub group: usize,
}

impl Waypoint {
    fn new(at: Coordinate, group: usize) -> Self {
        Self {
            lat: at.lat,
            lng: at.lng,
            group,
        }
    }
}

/// Points handed to the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeData {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub waypoints: Vec<Waypoint>,
}

/// Request body for the optimizer's `/cpp` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeRequest {
    pub algorithm: Algorithm,
    pub data: OptimizeData,
}

impl OptimizeRequest {
    /// Build a round-trip request from `origin`.
    ///
    /// Each entry of `errands` lists the candidate locations for one errand;
    /// its locations all share that errand's group. Empty groups are kept so
    /// group numbers line up with the caller's errand order.
    pub fn round_trip(origin: Coordinate, errands: &[Vec<Coordinate>], algorithm: Algorithm) -> Self {
        let origin = Waypoint::new(origin, 0);

        let waypoints = errands
            .iter()
            .enumerate()
            .flat_map(|(i, candidates)| candidates.iter().map(move |&at| Waypoint::new(at, i + 1)))
            .collect();

        Self {
            algorithm,
            data: OptimizeData {
                origin,
                destination: origin,
                waypoints,
            },
        }
    }

    /// Number of candidate waypoints, excluding origin and destination.
    pub fn waypoint_count(&self) -> usize {
        self.data.waypoints.len()
    }
}

/// Parse the optimizer's route response.
///
/// The solver replies either with the JSON array of stops or with a JSON
/// string whose contents are that array.
pub fn parse_route_response(body: &str) -> Result<Vec<RouteStop>, OptimizerError> {
    let invalid = |e: serde_json::Error| OptimizerError::InvalidResponse {
        message: e.to_string(),
    };

    let value: serde_json::Value = serde_json::from_str(body).map_err(invalid)?;
    match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).map_err(invalid),
        other => serde_json::from_value(other).map_err(invalid),
    }
}
