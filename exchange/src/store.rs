//! Trade persistence trait and in-memory implementation.

use async_trait::async_trait;
use fxgate_common::TradeRecord;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by trade stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Trade store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation.
    #[error("Trade store rejected the operation: {0}")]
    Rejected(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for trade persistence backends.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Persist one executed trade.
    async fn save(&self, record: &TradeRecord) -> StoreResult<()>;

    /// All persisted trades in insertion order.
    async fn list_all(&self) -> StoreResult<Vec<TradeRecord>>;

    /// Delete every trade. Returns how many were removed.
    async fn delete_all(&self) -> StoreResult<usize>;
}

/// In-memory trade store for single-process deployments and tests.
#[derive(Debug, Default)]
pub struct MemoryTradeStore {
    trades: RwLock<Vec<TradeRecord>>,
}

impl MemoryTradeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn save(&self, record: &TradeRecord) -> StoreResult<()> {
        self.trades.write().push(record.clone());
        debug!(trade_id = %record.id, "Trade saved");
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<TradeRecord>> {
        Ok(self.trades.read().clone())
    }

    async fn delete_all(&self) -> StoreResult<usize> {
        let mut trades = self.trades.write();
        let removed = trades.len();
        trades.clear();
        Ok(removed)
    }
}

/// Store wrapper whose writes can be toggled to fail, for exercising
/// persistence-failure paths.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct FailingTradeStore {
    inner: MemoryTradeStore,
    fail_saves: std::sync::atomic::AtomicBool,
}

#[cfg(any(test, feature = "test-utils"))]
impl FailingTradeStore {
    /// Create a store that initially behaves normally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle failure of `save` calls.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves
            .store(fail, std::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl TradeStore for FailingTradeStore {
    async fn save(&self, record: &TradeRecord) -> StoreResult<()> {
        if self.fail_saves.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(StoreError::Unavailable(
                "injected write failure".to_string(),
            ));
        }
        self.inner.save(record).await
    }

    async fn list_all(&self) -> StoreResult<Vec<TradeRecord>> {
        self.inner.list_all().await
    }

    async fn delete_all(&self) -> StoreResult<usize> {
        self.inner.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fxgate_common::Currency;
    use rust_decimal_macros::dec;

    fn make_record(from: &str, to: &str) -> TradeRecord {
        TradeRecord::new(
            Currency::new(from),
            Currency::new(to),
            dec!(100),
            dec!(85),
            dec!(0.85),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_save_and_list_preserves_order() {
        let store = MemoryTradeStore::new();
        let first = make_record("USD", "EUR");
        let second = make_record("GBP", "USD");

        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let trades = store.list_all().await.unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].id, first.id);
        assert_eq!(trades[1].id, second.id);
    }

    #[tokio::test]
    async fn test_delete_all_reports_count() {
        let store = MemoryTradeStore::new();
        assert_eq!(store.delete_all().await.unwrap(), 0);

        store.save(&make_record("USD", "EUR")).await.unwrap();
        store.save(&make_record("USD", "EUR")).await.unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_toggles() {
        let store = FailingTradeStore::new();
        let record = make_record("USD", "EUR");

        store.fail_saves(true);
        assert!(matches!(
            store.save(&record).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.list_all().await.unwrap().is_empty());

        store.fail_saves(false);
        store.save(&record).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
