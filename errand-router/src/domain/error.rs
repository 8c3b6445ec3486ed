//! Domain error types.
//!
//! These errors represent structural problems with a route response. They
//! are raised synchronously, before any provider request is issued.

/// Errors from planning legs out of a route response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A route needs an origin and at least one further stop.
    #[error("route must have at least 2 stops, got {found}")]
    InsufficientStops { found: usize },
}
