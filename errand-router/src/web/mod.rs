//! Web layer for the errand router.
//!
//! Provides HTTP endpoints for managing errands, starting and cancelling
//! route sessions, and reading back what the map currently shows.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, RouteControllerHandle, ServerDirections};
pub use templates::*;
