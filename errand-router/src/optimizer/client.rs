//! Optimizer HTTP client.

use tracing::{debug, info};

use crate::domain::RouteStop;

use super::error::OptimizerError;
use super::types::{OptimizeRequest, parse_route_response};

/// Configuration for the optimizer client.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Base URL of the optimizer service; requests go to `<base>/cpp`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OptimizerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 60,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/cpp", self.base_url.trim_end_matches('/'))
    }
}

/// Client for the stop-ordering optimizer.
#[derive(Debug, Clone)]
pub struct OptimizerClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OptimizerClient {
    /// Create a new optimizer client.
    pub fn new(config: OptimizerConfig) -> Result<Self, OptimizerError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint(),
            http,
        })
    }

    /// Ask the solver to order the request's waypoints.
    ///
    /// # Errors
    ///
    /// [`OptimizerError::NoErrands`] if the request has no waypoints, without
    /// contacting the solver.
    pub async fn solve(&self, request: &OptimizeRequest) -> Result<Vec<RouteStop>, OptimizerError> {
        if request.waypoint_count() == 0 {
            return Err(OptimizerError::NoErrands);
        }

        debug!(
            algorithm = ?request.algorithm,
            waypoints = request.waypoint_count(),
            "requesting stop ordering"
        );

        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OptimizerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let stops = parse_route_response(&body)?;
        info!(stops = stops.len(), "optimizer returned route");
        Ok(stops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::optimizer::Algorithm;

    #[test]
    fn endpoint_appends_cpp() {
        assert_eq!(OptimizerConfig::new("http://solver:8000").endpoint(), "http://solver:8000/cpp");
        assert_eq!(OptimizerConfig::new("http://solver:8000/").endpoint(), "http://solver:8000/cpp");
    }

    #[tokio::test]
    async fn empty_request_is_rejected_locally() {
        // Unroutable address: the request must never be sent
        let client = OptimizerClient::new(OptimizerConfig::new("http://127.0.0.1:9").with_timeout(1)).unwrap();
        let request = OptimizeRequest::round_trip(Coordinate::new(0.0, 0.0), &[], Algorithm::Tsp);

        let err = client.solve(&request).await.unwrap_err();

        assert!(matches!(err, OptimizerError::NoErrands));
    }
}
