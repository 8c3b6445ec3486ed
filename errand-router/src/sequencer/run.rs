//! The sequencer loop.

use tracing::{debug, info, warn};

use crate::config::RetryPolicy;
use crate::directions::{Directions, DirectionsOutcome, DirectionsProvider};
use crate::domain::Leg;

use super::state::{SequenceOutcome, SequencerState};

/// Where the sequencer publishes progress.
///
/// Every method returns `false` once the session it belongs to has been
/// superseded; in that case nothing was changed and the sequencer must stop.
pub trait LegSink: Send + Sync {
    /// Whether the session is still the active one.
    fn is_current(&self) -> bool;

    /// Record a state transition.
    fn enter(&self, state: SequencerState) -> bool;

    /// Render leg `index` and record its handle.
    fn complete_leg(&self, index: usize, leg: &Leg, directions: &Directions) -> bool;
}

/// Drives a session's legs through a directions provider, one at a time.
pub struct RouteSequencer<'a, P, K> {
    provider: &'a P,
    sink: &'a K,
    policy: RetryPolicy,
}

impl<'a, P: DirectionsProvider, K: LegSink> RouteSequencer<'a, P, K> {
    /// Create a new sequencer.
    pub fn new(provider: &'a P, sink: &'a K, policy: RetryPolicy) -> Self {
        Self {
            provider,
            sink,
            policy,
        }
    }

    /// Execute `legs` in order.
    ///
    /// Leg `i + 1` is requested only after leg `i` has been rendered. A
    /// rate-limited leg is re-requested after the policy's delay; any other
    /// failure ends the run. Errors never escape as `Err`: they are reported
    /// through the sink and the returned outcome.
    pub async fn run(&self, legs: &[Leg]) -> SequenceOutcome {
        for (index, leg) in legs.iter().enumerate() {
            let mut retries = 0u32;

            loop {
                if !self.sink.enter(SequencerState::Running { leg: index }) {
                    return self.superseded(index);
                }

                debug!(leg = index, %leg, "requesting leg");

                match self.provider.directions(leg).await {
                    DirectionsOutcome::Success(directions) => {
                        if !self.sink.complete_leg(index, leg, &directions) {
                            return self.superseded(index);
                        }
                        debug!(leg = index, "leg rendered");
                        break;
                    }
                    DirectionsOutcome::RateLimited => {
                        retries += 1;
                        if !self.policy.allows(retries) {
                            let retries = retries - 1;
                            if !self.sink.enter(SequencerState::Failed {
                                leg: index,
                                reason: format!("rate limited after {retries} retries"),
                            }) {
                                return self.superseded(index);
                            }
                            warn!(leg = index, retries, "giving up on rate-limited leg");
                            return SequenceOutcome::RetriesExhausted { leg: index, retries };
                        }

                        let delay = self.policy.backoff.delay(retries);
                        warn!(leg = index, retry = retries, ?delay, "rate limited, retrying");
                        if !self.sink.enter(SequencerState::RetryWait {
                            leg: index,
                            retry: retries,
                        }) {
                            return self.superseded(index);
                        }

                        tokio::time::sleep(delay).await;

                        if !self.sink.is_current() {
                            return self.superseded(index);
                        }
                    }
                    DirectionsOutcome::Failure(failure) => {
                        if !self.sink.enter(SequencerState::Failed {
                            leg: index,
                            reason: failure.to_string(),
                        }) {
                            return self.superseded(index);
                        }
                        warn!(leg = index, %failure, "directions request failed");
                        return SequenceOutcome::Failed {
                            leg: index,
                            failure,
                        };
                    }
                }
            }
        }

        if !self.sink.enter(SequencerState::Complete) {
            return self.superseded(legs.len().saturating_sub(1));
        }
        info!(legs = legs.len(), "route complete");
        SequenceOutcome::Complete { legs: legs.len() }
    }

    fn superseded(&self, leg: usize) -> SequenceOutcome {
        debug!(leg, "session superseded, discarding");
        SequenceOutcome::Superseded { leg }
    }
}
