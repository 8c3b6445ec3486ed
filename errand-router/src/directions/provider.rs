//! The directions provider seam and its outcome type.

use std::fmt;
use std::future::Future;

use chrono::Duration;

use crate::domain::Leg;

use super::error::DirectionsError;

/// Directions for one leg, as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    /// Encoded overview polyline of the whole leg.
    pub polyline: String,
    pub distance_meters: u64,
    pub duration: Duration,
    pub steps: Vec<Step>,
}

/// One instruction within a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub instruction: String,
    pub distance_meters: u64,
    pub duration: Duration,
    /// Provider travel mode for this step, e.g. `"WALKING"` or `"TRANSIT"`.
    pub travel_mode: String,
}

/// A non-retryable provider failure for one leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsFailure {
    /// Provider status code, e.g. `"ZERO_RESULTS"`.
    pub status: String,
    pub message: String,
}

impl fmt::Display for DirectionsFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

/// Result of asking the provider for one leg.
///
/// This is a closed set: the sequencer handles every variant explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectionsOutcome {
    Success(Directions),
    /// Transient; the same leg should be retried later.
    RateLimited,
    Failure(DirectionsFailure),
}

impl From<Result<Directions, DirectionsError>> for DirectionsOutcome {
    fn from(result: Result<Directions, DirectionsError>) -> Self {
        match result {
            Ok(directions) => DirectionsOutcome::Success(directions),
            Err(DirectionsError::RateLimited) => DirectionsOutcome::RateLimited,
            Err(e) => DirectionsOutcome::Failure(DirectionsFailure {
                status: e.status_code(),
                message: e.to_string(),
            }),
        }
    }
}

/// Trait for fetching directions for a single leg.
///
/// This abstraction allows the sequencer to be tested with mock providers.
pub trait DirectionsProvider: Send + Sync {
    /// Request directions for `leg`.
    fn directions(&self, leg: &Leg) -> impl Future<Output = DirectionsOutcome> + Send;
}
