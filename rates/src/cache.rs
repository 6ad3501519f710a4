//! Exchange-rate caching with TTL support.

use chrono::Duration;
use dashmap::DashMap;
use fxgate_common::{CurrencyPair, SharedClock, Timestamp};
use rust_decimal::Decimal;
use tracing::debug;

/// Cached rate entry.
#[derive(Debug, Clone)]
struct CachedRate {
    rate: Decimal,
    fetched_at: Timestamp,
}

/// Configuration for the rate cache.
#[derive(Debug, Clone)]
pub struct RateCacheConfig {
    /// How long a fetched rate stays fresh.
    pub ttl: Duration,
}

impl Default for RateCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(30),
        }
    }
}

/// Thread-safe rate cache keyed by directional currency pair.
///
/// An entry is fresh while its age has not exceeded the configured TTL; an
/// entry exactly at the boundary is still served. Stale entries are evicted
/// on read, and a fresh hit never touches the stored timestamp.
pub struct RateCache {
    cache: DashMap<CurrencyPair, CachedRate>,
    config: RateCacheConfig,
    clock: SharedClock,
}

impl RateCache {
    /// Create a new rate cache.
    pub fn new(config: RateCacheConfig, clock: SharedClock) -> Self {
        Self {
            cache: DashMap::new(),
            config,
            clock,
        }
    }

    /// Get the rate for a pair if a fresh entry exists.
    pub fn get(&self, pair: &CurrencyPair) -> Option<Decimal> {
        if let Some(entry) = self.cache.get(pair) {
            if self.is_fresh(&entry) {
                debug!(pair = %pair, "Cache hit");
                return Some(entry.rate);
            } else {
                debug!(pair = %pair, "Cache entry expired");
                // Remove expired entry
                drop(entry);
                self.cache.remove(pair);
            }
        }

        debug!(pair = %pair, "Cache miss");
        None
    }

    /// Insert a rate for a pair, overwriting any existing entry.
    ///
    /// The entry's timestamp is set to the current clock reading, so an
    /// overwrite opens a full TTL window.
    pub fn insert(&self, pair: CurrencyPair, rate: Decimal) {
        let entry = CachedRate {
            rate,
            fetched_at: self.clock.now(),
        };
        self.cache.insert(pair, entry);
    }

    /// Clear all cached rates.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Get the number of entries in cache, fresh or not.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Evict all stale entries. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let before = self.cache.len();
        self.cache.retain(|_, entry| self.is_fresh(entry));
        before.saturating_sub(self.cache.len())
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let total = self.cache.len();
        let fresh = self
            .cache
            .iter()
            .filter(|entry| self.is_fresh(entry.value()))
            .count();

        CacheStats {
            total_entries: total,
            fresh_entries: fresh,
            stale_entries: total.saturating_sub(fresh),
        }
    }

    // Freshness is inclusive: age == ttl is still fresh.
    fn is_fresh(&self, entry: &CachedRate) -> bool {
        let age = self.clock.now().signed_duration_since(entry.fetched_at);
        age <= self.config.ttl
    }
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
}
