//! Upstream rate source trait and test implementation.

use async_trait::async_trait;
use fxgate_common::CurrencyPair;
use rust_decimal::Decimal;

use crate::error::SourceResult;

#[cfg(any(test, feature = "test-utils"))]
use crate::error::SourceError;
#[cfg(any(test, feature = "test-utils"))]
use std::sync::atomic::{AtomicU64, Ordering};

/// Trait for upstream exchange-rate sources.
///
/// Implementations wrap whatever transport actually supplies quotes. The
/// resolver assumes nothing about them beyond the error taxonomy in
/// [`SourceError`](crate::error::SourceError).
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Get the source name, for logging.
    fn name(&self) -> &str;

    /// Fetch the current rate for a directional currency pair.
    async fn fetch_rate(&self, pair: &CurrencyPair) -> SourceResult<Decimal>;
}

/// Mock rate source for testing.
///
/// Serves configured per-pair quotes, counts every fetch issued, and can be
/// switched into a failure mode to exercise error paths.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateSource {
    name: String,
    rates: dashmap::DashMap<CurrencyPair, Decimal>,
    failure: parking_lot::Mutex<Option<SourceError>>,
    calls: AtomicU64,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateSource {
    /// Create a new mock source.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rates: dashmap::DashMap::new(),
            failure: parking_lot::Mutex::new(None),
            calls: AtomicU64::new(0),
        }
    }

    /// Set the quote served for a pair.
    pub fn set_rate(&self, pair: CurrencyPair, rate: Decimal) {
        self.rates.insert(pair, rate);
    }

    /// Make every subsequent fetch fail with `error`.
    pub fn fail_with(&self, error: SourceError) {
        *self.failure.lock() = Some(error);
    }

    /// Return to serving configured quotes.
    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    /// Number of fetches issued against this source, failed ones included.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for MockRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rate(&self, pair: &CurrencyPair) -> SourceResult<Decimal> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }

        self.rates
            .get(pair)
            .map(|rate| *rate)
            .ok_or(SourceError::Status { code: 404 })
    }
}
