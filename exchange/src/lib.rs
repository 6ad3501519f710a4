//! fxgate Exchange
//!
//! The conversion service for fxgate: validates requests, enforces per-client
//! trade quotas, prices conversions through `fxgate-rates`, and persists every
//! executed trade.
//!
//! # Example
//!
//! ```rust,ignore
//! use fxgate_common::{ClientId, Currency, SystemClock};
//! use fxgate_exchange::{ExchangeConfig, ExchangeService, MemoryTradeStore};
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let service = ExchangeService::new(
//!     ExchangeConfig::from_env(),
//!     source,
//!     Arc::new(MemoryTradeStore::new()),
//!     Arc::new(SystemClock),
//! );
//!
//! let record = service
//!     .convert(&ClientId::new("desk-1"), Currency::usd(), Currency::eur(), dec!(100))
//!     .await?;
//! ```

pub mod service;
pub mod admission;
pub mod store;
pub mod config;
pub mod error;

pub use admission::{AdmissionConfig, AdmissionController, AdmissionStats};
pub use config::ExchangeConfig;
pub use error::{ExchangeError, ExchangeResult};
pub use service::{ClearOutcome, ExchangeService, ExchangeStats};
pub use store::{MemoryTradeStore, StoreError, StoreResult, TradeStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::FailingTradeStore;
