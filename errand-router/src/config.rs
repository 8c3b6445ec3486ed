//! Configuration for the route sequencer and the server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default delay before re-requesting a rate-limited leg.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// How long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed(Duration),
    /// `initial`, doubling per retry, capped at `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Backoff::Fixed(d) => d,
            Backoff::Exponential { initial, max } => {
                let factor = 2u32.saturating_pow(retry.saturating_sub(1));
                initial.saturating_mul(factor).min(max)
            }
        }
    }
}

/// Retry policy for rate-limited legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retries per leg; `None` retries until success or supersession.
    pub max_retries: Option<u32>,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Retry forever with a fixed delay.
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_retries: None,
            backoff: Backoff::Fixed(delay),
        }
    }

    /// Limit the number of retries per leg.
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// Set the backoff.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Whether retry number `retry` (1-based) is permitted.
    pub fn allows(&self, retry: u32) -> bool {
        self.max_retries.is_none_or(|max| retry <= max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(DEFAULT_RETRY_DELAY)
    }
}

/// Configuration for the route sequencer.
#[derive(Debug, Clone, Default)]
pub struct SequencerConfig {
    pub retry: RetryPolicy,
}

impl SequencerConfig {
    /// Create a config with the given retry policy.
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }
}

/// Errors reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("DIRECTIONS_API_KEY must be set unless DIRECTIONS_MOCK is enabled")]
    MissingApiKey,
}

/// Where directions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionsSource {
    Api {
        api_key: String,
        base_url: Option<String>,
    },
    /// Straight lines, no network.
    Mock,
}

/// Server configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub directions: DirectionsSource,
    pub optimizer_url: Option<String>,
    pub errands_file: Option<PathBuf>,
    pub sequencer: SequencerConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let mock = get("DIRECTIONS_MOCK").is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes"));
        let directions = if mock {
            DirectionsSource::Mock
        } else {
            DirectionsSource::Api {
                api_key: get("DIRECTIONS_API_KEY").ok_or(ConfigError::MissingApiKey)?,
                base_url: get("DIRECTIONS_BASE_URL"),
            }
        };

        let delay = match get("RETRY_DELAY_MS") {
            Some(v) => Duration::from_millis(parse_number("RETRY_DELAY_MS", &v)?),
            None => DEFAULT_RETRY_DELAY,
        };
        let mut retry = RetryPolicy::unbounded(delay);
        if let Some(v) = get("RETRY_MAX_RETRIES") {
            let n = parse_number("RETRY_MAX_RETRIES", &v)?;
            retry = retry.with_max_retries(u32::try_from(n).unwrap_or(u32::MAX));
        }

        Ok(Self {
            bind_addr,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".into()).into(),
            directions,
            optimizer_url: get("OPTIMIZER_URL"),
            errands_file: get("ERRANDS_FILE").map(PathBuf::from),
            sequencer: SequencerConfig::new(retry),
        })
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
