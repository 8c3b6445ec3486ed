//! Mock directions providers for development and testing.
//!
//! `StraightLineDirections` answers every request offline with a direct line
//! between the two points. `ScriptedDirections` replays a queue of canned
//! outcomes and records every leg it was asked for.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::Duration;
use geo::{Distance, Haversine};

use crate::domain::{Coordinate, Leg, TravelMode};

use super::polyline::encode_polyline;
use super::provider::{Directions, DirectionsOutcome, DirectionsProvider, Step};

/// Assumed walking speed (m/s).
const WALK_SPEED: f64 = 1.4;

/// Assumed average transit speed including waits (m/s).
const TRANSIT_SPEED: f64 = 8.0;

/// Great-circle distance in metres.
fn haversine_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    Haversine.distance(geo::Point::from(*a), geo::Point::from(*b))
}

/// Directions provider that draws a straight line for every leg.
///
/// Useful for running the server without an API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineDirections;

impl StraightLineDirections {
    /// Compute straight-line directions for a leg.
    pub fn directions_for(&self, leg: &Leg) -> Directions {
        let meters = haversine_meters(&leg.origin, &leg.destination);
        let speed = match leg.mode {
            TravelMode::Walk => WALK_SPEED,
            TravelMode::Transit => TRANSIT_SPEED,
        };
        let duration = Duration::seconds((meters / speed).round() as i64);
        let travel_mode = leg.mode.as_api_str().to_uppercase();

        Directions {
            polyline: encode_polyline(&[leg.origin, leg.destination]),
            distance_meters: meters.round() as u64,
            duration,
            steps: vec![Step {
                instruction: format!("Head to {}", leg.destination),
                distance_meters: meters.round() as u64,
                duration,
                travel_mode,
            }],
        }
    }
}

impl DirectionsProvider for StraightLineDirections {
    async fn directions(&self, leg: &Leg) -> DirectionsOutcome {
        DirectionsOutcome::Success(self.directions_for(leg))
    }
}

/// Directions provider that replays scripted outcomes.
///
/// Each request pops the next queued outcome; once the queue is empty every
/// request succeeds with straight-line directions.
#[derive(Debug, Default)]
pub struct ScriptedDirections {
    script: Mutex<VecDeque<DirectionsOutcome>>,
    calls: Mutex<Vec<Leg>>,
}

impl ScriptedDirections {
    /// Create a provider with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that replays `outcomes` in order.
    pub fn with_outcomes(outcomes: impl IntoIterator<Item = DirectionsOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue another outcome.
    pub fn push(&self, outcome: DirectionsOutcome) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
    }

    /// Every leg requested so far, in request order.
    pub fn calls(&self) -> Vec<Leg> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn next_outcome(&self, leg: &Leg) -> DirectionsOutcome {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*leg);
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        scripted.unwrap_or_else(|| DirectionsOutcome::Success(StraightLineDirections.directions_for(leg)))
    }
}

impl DirectionsProvider for ScriptedDirections {
    async fn directions(&self, leg: &Leg) -> DirectionsOutcome {
        self.next_outcome(leg)
    }
}
