//! Conversion orchestration.

use std::sync::Arc;

use fxgate_common::{ClientId, Currency, CurrencyPair, SharedClock, TradeRecord};
use fxgate_rates::{CacheStats, RateResolver, RateSource};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::admission::{AdmissionController, AdmissionStats};
use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, ExchangeResult};
use crate::store::TradeStore;

/// Outcome of clearing the trade history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The given number of trades were deleted.
    Cleared { count: usize },
    /// There was no history to delete.
    Empty,
}

/// The conversion service.
///
/// Orders each request as validate, admit, resolve, persist, charge. A
/// failure at any step leaves no partial state: no record without a quota
/// charge being due, no quota charge without a persisted record.
pub struct ExchangeService {
    resolver: RateResolver,
    admission: AdmissionController,
    store: Arc<dyn TradeStore>,
    clock: SharedClock,
}

impl ExchangeService {
    /// Create a new exchange service.
    pub fn new(
        config: ExchangeConfig,
        source: Arc<dyn RateSource>,
        store: Arc<dyn TradeStore>,
        clock: SharedClock,
    ) -> Self {
        Self {
            resolver: RateResolver::new(source, config.cache, clock.clone()),
            admission: AdmissionController::new(config.admission, clock.clone()),
            store,
            clock,
        }
    }

    /// Convert `amount` between two currencies on behalf of a client.
    ///
    /// On success the trade is persisted, the client's quota is charged, and
    /// the persisted record is returned.
    #[instrument(skip(self), fields(client = %client, from = %from, to = %to, amount = %amount))]
    pub async fn convert(
        &self,
        client: &ClientId,
        from: Currency,
        to: Currency,
        amount: Decimal,
    ) -> ExchangeResult<TradeRecord> {
        self.validate_request(client, &from, &to, amount)?;

        if !self.admission.is_allowed(client) {
            let retry_after_ms = self
                .admission
                .retry_after(client)
                .map(|remaining| remaining.num_milliseconds().max(0) as u64)
                .unwrap_or(0);

            warn!(retry_after_ms, "Trade limit exceeded");
            return Err(ExchangeError::RateLimitExceeded { retry_after_ms });
        }

        let pair = CurrencyPair::new(from.clone(), to.clone());
        let rate = self
            .resolver
            .resolve(&pair)
            .await
            .map_err(ExchangeError::UpstreamUnavailable)?;

        let converted = amount * rate;
        let record = TradeRecord::new(from, to, amount, converted, rate, self.clock.now());

        self.store
            .save(&record)
            .await
            .map_err(ExchangeError::PersistenceError)?;

        // Quota is charged only once the trade is durably recorded.
        self.admission.record_trade(client);

        info!(
            trade_id = %record.id,
            rate = %rate,
            converted = %converted,
            "Conversion completed"
        );

        Ok(record)
    }

    /// All persisted trades in insertion order.
    pub async fn trade_history(&self) -> ExchangeResult<Vec<TradeRecord>> {
        debug!("Retrieving trade history");
        self.store
            .list_all()
            .await
            .map_err(ExchangeError::PersistenceError)
    }

    /// Delete the entire trade history.
    pub async fn clear_history(&self) -> ExchangeResult<ClearOutcome> {
        let removed = self
            .store
            .delete_all()
            .await
            .map_err(ExchangeError::PersistenceError)?;

        if removed == 0 {
            debug!("No trade history to clear");
            return Ok(ClearOutcome::Empty);
        }

        info!(removed, "Trade history cleared");
        Ok(ClearOutcome::Cleared { count: removed })
    }

    /// One-shot maintenance sweep: evict stale cached rates and drop lapsed
    /// admission windows. Returns (rates evicted, windows purged). Periodic
    /// scheduling is the embedder's concern.
    pub fn cleanup(&self) -> (usize, usize) {
        let evicted = self.resolver.cache().evict_expired();
        let purged = self.admission.purge_expired();

        info!(evicted, purged, "Maintenance sweep completed");
        (evicted, purged)
    }

    /// Get service statistics.
    pub fn stats(&self) -> ExchangeStats {
        ExchangeStats {
            cache: self.resolver.cache().stats(),
            admission: self.admission.stats(),
        }
    }

    fn validate_request(
        &self,
        client: &ClientId,
        from: &Currency,
        to: &Currency,
        amount: Decimal,
    ) -> ExchangeResult<()> {
        if amount <= Decimal::ZERO {
            return Err(ExchangeError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }

        if from.code().is_empty() || to.code().is_empty() {
            return Err(ExchangeError::InvalidRequest(
                "Currency codes must be non-empty".to_string(),
            ));
        }

        if client.is_empty() {
            return Err(ExchangeError::InvalidRequest(
                "Client id must be non-empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Service statistics.
#[derive(Debug, Clone)]
pub struct ExchangeStats {
    pub cache: CacheStats,
    pub admission: AdmissionStats,
}
