//! Directions provider client.
//!
//! This module provides the seam between the route sequencer and an external
//! single-leg directions service, plus an HTTP client for a Google-style
//! Directions JSON API.
//!
//! Key characteristics of the provider:
//! - One request covers exactly one origin-to-destination leg
//! - Quota exhaustion is reported as `OVER_QUERY_LIMIT` in the body (or
//!   HTTP 429) and is transient
//! - Every other non-`OK` status is a hard failure for that leg

mod client;
mod error;
mod mock;
mod polyline;
mod provider;
mod types;

pub use client::{DirectionsClient, DirectionsConfig};
pub use error::DirectionsError;
pub use mock::{ScriptedDirections, StraightLineDirections};
pub use polyline::{decode_polyline, encode_polyline};
pub use provider::{Directions, DirectionsFailure, DirectionsOutcome, DirectionsProvider, Step};
pub use types::DirectionsResponse;
