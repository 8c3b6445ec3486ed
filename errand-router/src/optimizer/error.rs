//! Optimizer client error types.

/// Errors from the optimizer HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Optimizer answered with a non-success status
    #[error("optimizer error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not a route
    #[error("invalid route response: {message}")]
    InvalidResponse { message: String },

    /// Nothing to optimize
    #[error("no errands to visit")]
    NoErrands,
}
