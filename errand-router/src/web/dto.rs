//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, ErrandDescriptor};
use crate::optimizer::Algorithm;
use crate::render::MapSnapshot;
use crate::session::{SessionStatus, SessionToken};

/// Request to order errands with the optimizer and route through them.
#[derive(Debug, Deserialize)]
pub struct OptimizeRouteRequest {
    /// Where the round trip starts and ends
    pub origin: Coordinate,

    /// Candidate locations per errand, in errand order
    pub errands: Vec<Vec<Coordinate>>,

    /// Solver to use (defaults to `tsp`)
    #[serde(default)]
    pub algorithm: Algorithm,
}

/// A route session was started.
#[derive(Debug, Serialize)]
pub struct RouteStarted {
    /// Session identifier
    pub session: SessionToken,

    /// Number of stops in the route
    pub stops: usize,

    /// Number of legs that will be requested
    pub legs: usize,
}

/// Current route and map contents.
#[derive(Debug, Serialize)]
pub struct RouteSnapshotResponse {
    /// Progress of the active session, if there is one
    pub session: Option<SessionStatus>,

    /// Itinerary, drawn legs and markers
    #[serde(flatten)]
    pub map: MapSnapshot,
}

/// Known errands.
#[derive(Debug, Serialize)]
pub struct ErrandListResponse {
    pub errands: Vec<ErrandDescriptor>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
