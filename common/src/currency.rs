//! Currency codes and directional pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency code, held exactly as the caller supplied it.
///
/// Codes are compared verbatim: no case folding, no trimming. `"usd"` and
/// `"USD"` are distinct currencies as far as this crate is concerned;
/// callers that want ISO 4217 semantics must normalize before constructing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A directional currency pair: the currency being sold and the currency
/// being bought.
///
/// Direction matters everywhere this type is used as a key: `USD/EUR` and
/// `EUR/USD` are unrelated entries and no rate is ever derived by inverting
/// the opposite direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency being converted from.
    pub from: Currency,
    /// Currency being converted to.
    pub to: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}
