//! Leg planning.
//!
//! Turns an ordered route response into the legs the sequencer executes and
//! the labels the itinerary display shows. Planning is pure and synchronous:
//! a malformed response fails here, before any provider request is issued.

mod itinerary;
mod plan;

pub use itinerary::{CURRENT_LOCATION, Itinerary, point_letter};
pub use plan::{RoutePlan, plan_route};
