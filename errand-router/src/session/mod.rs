//! Route sessions.
//!
//! Each "compute route" invocation creates a new [`RouteSession`] with a
//! fresh [`SessionToken`]. The [`RouteController`] owns the single active
//! session: starting a new one clears the old one's legs, replaces it, and
//! aborts its sequencer task. Everything the sequencer does to the display
//! goes through a sink that compares its token with the active one under the
//! display lock, so a stale task can never draw on a newer route.

mod controller;
mod route_session;
mod sink;

#[cfg(test)]
mod session_tests;

pub use controller::{RouteController, SessionStatus};
pub use route_session::{RouteSession, SessionToken};
