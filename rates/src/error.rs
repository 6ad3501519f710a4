//! Rate source error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by upstream rate sources.
///
/// Kinds stay distinguishable so callers can tell a timeout from a bad
/// payload without parsing message strings.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The source did not answer in time.
    #[error("Rate source timed out")]
    Timeout,

    /// The source answered with a non-success status.
    #[error("Rate source returned status {code}")]
    Status { code: u16 },

    /// The source payload could not be decoded.
    #[error("Malformed rate payload: {0}")]
    Decode(String),

    /// The transport failed before any response was received.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The source quoted a rate that is zero or negative.
    #[error("Non-positive rate {0} quoted")]
    NonPositiveRate(Decimal),
}

/// Result type for rate source operations.
pub type SourceResult<T> = Result<T, SourceError>;
