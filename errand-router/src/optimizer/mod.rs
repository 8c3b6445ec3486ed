//! Stop-ordering optimizer client.
//!
//! The optimizer is an external TSP/GTSP solver. We only form its request
//! (origin, destination and grouped candidate waypoints) and read back the
//! ordered route response that a route session consumes.

mod client;
mod error;
mod types;

pub use client::{OptimizerClient, OptimizerConfig};
pub use error::OptimizerError;
pub use types::{Algorithm, OptimizeRequest, OptimizeData, Waypoint, parse_route_response};
