//! Cached rate resolution over an upstream source.

use std::sync::Arc;

use fxgate_common::{CurrencyPair, SharedClock};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::cache::{RateCache, RateCacheConfig};
use crate::error::{SourceError, SourceResult};
use crate::source::RateSource;

/// Resolves exchange rates, preferring fresh cached values and falling back
/// to the upstream source.
pub struct RateResolver {
    source: Arc<dyn RateSource>,
    cache: RateCache,
}

impl RateResolver {
    /// Create a new resolver over the given source.
    pub fn new(source: Arc<dyn RateSource>, config: RateCacheConfig, clock: SharedClock) -> Self {
        Self {
            source,
            cache: RateCache::new(config, clock),
        }
    }

    /// Resolve the rate for a directional currency pair.
    ///
    /// Serves the cached rate while it is fresh; otherwise fetches from the
    /// upstream source and caches the result. An upstream failure propagates
    /// unchanged and leaves the cache untouched: a stale value is never
    /// served as a fallback.
    #[instrument(skip(self), fields(pair = %pair))]
    pub async fn resolve(&self, pair: &CurrencyPair) -> SourceResult<Decimal> {
        if let Some(cached) = self.cache.get(pair) {
            debug!("Using cached rate");
            return Ok(cached);
        }

        let rate = match self.source.fetch_rate(pair).await {
            Ok(rate) => rate,
            Err(error) => {
                warn!(source = self.source.name(), error = %error, "Rate source failed");
                return Err(error);
            }
        };

        if rate <= Decimal::ZERO {
            warn!(source = self.source.name(), rate = %rate, "Rejected non-positive rate");
            return Err(SourceError::NonPositiveRate(rate));
        }

        // Concurrent misses may each fetch and insert; the last write wins.
        self.cache.insert(pair.clone(), rate);

        info!(source = self.source.name(), rate = %rate, "Fetched fresh rate");

        Ok(rate)
    }

    /// Access the underlying cache.
    pub fn cache(&self) -> &RateCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockRateSource;
    use chrono::{Duration, Utc};
    use fxgate_common::{Currency, ManualClock};
    use rust_decimal_macros::dec;

    fn usd_eur() -> CurrencyPair {
        CurrencyPair::new(Currency::usd(), Currency::eur())
    }

    fn eur_usd() -> CurrencyPair {
        CurrencyPair::new(Currency::eur(), Currency::usd())
    }

    fn setup() -> (RateResolver, Arc<MockRateSource>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let source = Arc::new(MockRateSource::new("test"));
        source.set_rate(usd_eur(), dec!(0.85));

        let resolver = RateResolver::new(source.clone(), RateCacheConfig::default(), clock.clone());
        (resolver, source, clock)
    }

    #[tokio::test]
    async fn test_fresh_hit_issues_no_upstream_call() {
        let (resolver, source, _clock) = setup();

        assert_eq!(resolver.resolve(&usd_eur()).await.unwrap(), dec!(0.85));
        assert_eq!(resolver.resolve(&usd_eur()).await.unwrap(), dec!(0.85));

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_refetch_after_ttl_opens_fresh_window() {
        let (resolver, source, clock) = setup();

        resolver.resolve(&usd_eur()).await.unwrap();

        // Exactly at the TTL the cached value still serves.
        clock.advance(Duration::minutes(30));
        resolver.resolve(&usd_eur()).await.unwrap();
        assert_eq!(source.calls(), 1);

        // Past it, a second upstream call is issued.
        clock.advance(Duration::seconds(1));
        resolver.resolve(&usd_eur()).await.unwrap();
        assert_eq!(source.calls(), 2);

        // The refetch stamped a new TTL window.
        clock.advance(Duration::minutes(29));
        resolver.resolve(&usd_eur()).await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_kinds_propagate() {
        let (resolver, source, _clock) = setup();

        source.fail_with(SourceError::Timeout);
        assert!(matches!(
            resolver.resolve(&usd_eur()).await,
            Err(SourceError::Timeout)
        ));

        source.fail_with(SourceError::Status { code: 503 });
        assert!(matches!(
            resolver.resolve(&usd_eur()).await,
            Err(SourceError::Status { code: 503 })
        ));

        source.fail_with(SourceError::Decode("truncated body".to_string()));
        assert!(matches!(
            resolver.resolve(&usd_eur()).await,
            Err(SourceError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_value_is_not_served_on_failure() {
        let (resolver, source, clock) = setup();

        resolver.resolve(&usd_eur()).await.unwrap();

        clock.advance(Duration::minutes(31));
        source.fail_with(SourceError::Status { code: 503 });

        // The expired entry must not come back as a fallback.
        assert!(matches!(
            resolver.resolve(&usd_eur()).await,
            Err(SourceError::Status { code: 503 })
        ));
        assert_eq!(resolver.cache().len(), 0);

        source.clear_failure();
        source.set_rate(usd_eur(), dec!(0.90));
        assert_eq!(resolver.resolve(&usd_eur()).await.unwrap(), dec!(0.90));
    }

    #[tokio::test]
    async fn test_non_positive_rate_rejected() {
        let (resolver, source, _clock) = setup();
        source.set_rate(usd_eur(), dec!(0));

        assert!(matches!(
            resolver.resolve(&usd_eur()).await,
            Err(SourceError::NonPositiveRate(_))
        ));
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_pairs_are_direction_sensitive() {
        let (resolver, source, _clock) = setup();
        source.set_rate(eur_usd(), dec!(1.17));

        assert_eq!(resolver.resolve(&usd_eur()).await.unwrap(), dec!(0.85));
        assert_eq!(resolver.resolve(&eur_usd()).await.unwrap(), dec!(1.17));

        assert_eq!(source.calls(), 2);
        assert_eq!(resolver.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_converge() {
        let (resolver, source, _clock) = setup();
        let resolver = Arc::new(resolver);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let resolver = resolver.clone();
            handles.push(tokio::spawn(
                async move { resolver.resolve(&usd_eur()).await },
            ));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), dec!(0.85));
        }

        assert_eq!(resolver.cache().len(), 1);
        assert!(source.calls() >= 1);
    }
}
