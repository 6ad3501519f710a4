//! fxgate Rates
//!
//! Exchange-rate acquisition for fxgate: a TTL cache keyed by directional
//! currency pair, the upstream source trait, and the resolver that ties the
//! two together.
//!
//! # Example
//!
//! ```rust,ignore
//! use fxgate_common::{Currency, CurrencyPair, SystemClock};
//! use fxgate_rates::{RateCacheConfig, RateResolver};
//! use std::sync::Arc;
//!
//! let resolver = RateResolver::new(source, RateCacheConfig::default(), Arc::new(SystemClock));
//!
//! let pair = CurrencyPair::new(Currency::usd(), Currency::eur());
//! let rate = resolver.resolve(&pair).await?;
//! ```

pub mod resolver;
pub mod source;
pub mod cache;
pub mod error;

pub use cache::{CacheStats, RateCache, RateCacheConfig};
pub use error::{SourceError, SourceResult};
pub use resolver::RateResolver;
pub use source::RateSource;

#[cfg(any(test, feature = "test-utils"))]
pub use source::MockRateSource;
