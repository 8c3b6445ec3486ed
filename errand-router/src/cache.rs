//! Caching layer for directions responses.
//!
//! Recomputing a route usually re-requests legs that were fetched moments
//! ago. Successful directions are cached per (origin, destination, mode) so
//! those requests do not spend provider quota. Rate-limit and failure
//! outcomes are never cached.
//!
//! Coordinates are quantised to 1e-6 degrees for the key, well inside the
//! errand matching tolerance.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::directions::{Directions, DirectionsOutcome, DirectionsProvider};
use crate::domain::{Coordinate, Leg, TravelMode};

/// Cache key for a leg: quantised origin, quantised destination, and mode.
type LegKey = ((i64, i64), (i64, i64), TravelMode);

fn quantise(c: &Coordinate) -> (i64, i64) {
    ((c.lat * 1e6).round() as i64, (c.lng * 1e6).round() as i64)
}

fn leg_key(leg: &Leg) -> LegKey {
    (quantise(&leg.origin), quantise(&leg.destination), leg.mode)
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Directions provider with caching.
///
/// Wraps any `DirectionsProvider` and caches successful directions.
pub struct CachedDirections<P> {
    inner: P,
    cache: MokaCache<LegKey, Arc<Directions>>,
}

impl<P: DirectionsProvider> CachedDirections<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<P: DirectionsProvider> DirectionsProvider for CachedDirections<P> {
    async fn directions(&self, leg: &Leg) -> DirectionsOutcome {
        let key = leg_key(leg);

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            trace!(%leg, "directions cache hit");
            return DirectionsOutcome::Success((*cached).clone());
        }

        let outcome = self.inner.directions(leg).await;

        if let DirectionsOutcome::Success(directions) = &outcome {
            self.cache.insert(key, Arc::new(directions.clone())).await;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::ScriptedDirections;

    fn leg() -> Leg {
        Leg::new(
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
            TravelMode::Walk,
        )
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn key_ignores_sub_micro_degree_noise() {
        let a = leg();
        let mut b = leg();
        b.origin.lat += 1e-9;
        assert_eq!(leg_key(&a), leg_key(&b));

        let mut c = leg();
        c.mode = TravelMode::Transit;
        assert_ne!(leg_key(&a), leg_key(&c));
    }

    #[tokio::test]
    async fn success_is_cached() {
        let cached = CachedDirections::new(ScriptedDirections::new(), &CacheConfig::default());

        let first = cached.directions(&leg()).await;
        let second = cached.directions(&leg()).await;

        assert_eq!(first, second);
        assert_eq!(cached.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn rate_limit_is_not_cached() {
        let provider = ScriptedDirections::with_outcomes([DirectionsOutcome::RateLimited]);
        let cached = CachedDirections::new(provider, &CacheConfig::default());

        assert_eq!(cached.directions(&leg()).await, DirectionsOutcome::RateLimited);
        assert!(matches!(
            cached.directions(&leg()).await,
            DirectionsOutcome::Success(_)
        ));
        assert_eq!(cached.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedDirections::new(ScriptedDirections::new(), &CacheConfig::default());

        cached.directions(&leg()).await;
        cached.invalidate_cache();
        cached.directions(&leg()).await;

        assert_eq!(cached.inner().call_count(), 2);
    }
}
