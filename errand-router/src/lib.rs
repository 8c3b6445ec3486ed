//! Errand route planner server.
//!
//! Takes an ordered list of stops (usually from a TSP/GTSP optimizer),
//! splits it into walking and transit legs, labels each stop with the errand
//! it serves, and fetches directions for the legs one at a time, backing
//! off whenever the directions provider rate-limits us.

pub mod cache;
pub mod config;
pub mod directions;
pub mod domain;
pub mod errands;
pub mod optimizer;
pub mod planner;
pub mod render;
pub mod sequencer;
pub mod session;
pub mod web;
