//! Directions client error types.

/// Errors from the directions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider answered with a non-OK status in the body
    #[error("provider status {status}{}", detail_suffix(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    /// No route exists between the two points for this mode
    #[error("no route found")]
    NoRoute,

    /// Rate limited by the provider
    #[error("rate limited by directions provider")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl DirectionsError {
    /// Provider status code for reporting, e.g. `"ZERO_RESULTS"` or `"HTTP_500"`.
    pub fn status_code(&self) -> String {
        match self {
            DirectionsError::Http(_) => "HTTP_ERROR".to_string(),
            DirectionsError::Json { .. } => "INVALID_RESPONSE".to_string(),
            DirectionsError::Api { status, .. } => format!("HTTP_{status}"),
            DirectionsError::Status { status, .. } => status.clone(),
            DirectionsError::NoRoute => "ZERO_RESULTS".to_string(),
            DirectionsError::RateLimited => "OVER_QUERY_LIMIT".to_string(),
            DirectionsError::Unauthorized => "REQUEST_DENIED".to_string(),
        }
    }
}
