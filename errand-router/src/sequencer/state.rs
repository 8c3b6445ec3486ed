//! Sequencer states and outcomes.

use serde::Serialize;

use crate::directions::DirectionsFailure;

/// Where a session's sequencer currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SequencerState {
    /// Session created, no request issued yet.
    Idle,
    /// Request for `leg` in flight.
    Running { leg: usize },
    /// `leg` was rate limited; waiting before retry number `retry`.
    RetryWait { leg: usize, retry: u32 },
    /// Every leg rendered.
    Complete,
    /// `leg` could not be fetched; no further legs will be requested.
    Failed { leg: usize, reason: String },
}

impl SequencerState {
    /// Whether the sequencer will make no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SequencerState::Complete | SequencerState::Failed { .. })
    }

    /// Leg currently being worked on, if any.
    pub fn current_leg(&self) -> Option<usize> {
        match self {
            SequencerState::Running { leg }
            | SequencerState::RetryWait { leg, .. }
            | SequencerState::Failed { leg, .. } => Some(*leg),
            SequencerState::Idle | SequencerState::Complete => None,
        }
    }
}

/// How a sequencer run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// All `legs` rendered.
    Complete { legs: usize },
    /// A newer session took over while working on `leg`.
    Superseded { leg: usize },
    /// The provider rejected `leg`.
    Failed {
        leg: usize,
        failure: DirectionsFailure,
    },
    /// `leg` was still rate limited after `retries` retries.
    RetriesExhausted { leg: usize, retries: u32 },
}
