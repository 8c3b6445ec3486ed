//! Sequential leg execution.
//!
//! The sequencer walks a session's legs strictly in order, keeping exactly
//! one directions request in flight:
//!
//! ```text
//! Idle -> Running(0) -> Running(1) -> ... -> Complete
//!            |   ^
//!            v   |  (rate limited: wait, re-request the same leg)
//!        RetryWait(i)
//!
//! any Running(i) --(provider failure / retries exhausted)--> Failed(i)
//! ```
//!
//! Rendering and state changes go through a [`LegSink`], which refuses them
//! once the session has been superseded. The sequencer checks the sink before
//! every request and after every wait, so a stale session stops without any
//! visible effect.

mod run;
mod state;

pub use run::{LegSink, RouteSequencer};
pub use state::{SequenceOutcome, SequencerState};
