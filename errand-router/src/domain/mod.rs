//! Domain types for the errand router.
//!
//! This module contains the core value types shared by the planner, the
//! sequencer and the web layer. They carry no I/O and enforce their
//! invariants at construction time where there are any.

mod coordinate;
mod errand;
mod error;
mod leg;
mod stop;

pub use coordinate::{COORDINATE_EPSILON, Coordinate};
pub use errand::{ErrandDescriptor, describe};
pub use error::PlanError;
pub use leg::{Leg, TravelMode};
pub use stop::RouteStop;
