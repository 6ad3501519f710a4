//! Exchange service error types.

use fxgate_rates::SourceError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the exchange service.
///
/// Exactly four kinds cross the service boundary; transport layers map them
/// to responses without inspecting message strings.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The request failed validation before any work was done.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The client has used up its trade quota for the current window.
    #[error("Trade limit exceeded, retry after {retry_after_ms} ms")]
    RateLimitExceeded { retry_after_ms: u64 },

    /// The upstream rate source failed; the cause stays distinguishable.
    #[error("Rate source unavailable: {0}")]
    UpstreamUnavailable(#[source] SourceError),

    /// The trade store failed; nothing was recorded.
    #[error("Persistence failure: {0}")]
    PersistenceError(#[source] StoreError),
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
