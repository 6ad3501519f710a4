//! Trade identifiers and records.

use crate::clock::Timestamp;
use crate::currency::{Currency, CurrencyPair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an executed trade (UUIDv7, time-ordered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeId(Uuid);

impl TradeId {
    /// Generate a new time-ordered trade ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a trading client.
///
/// No structure is assumed beyond non-emptiness; ids are compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(String);

impl ClientId {
    /// Create a new client ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the ID is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A completed currency conversion, as persisted and returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Unique trade identifier.
    pub id: TradeId,
    /// Currency the amount was converted from.
    pub from_currency: Currency,
    /// Currency the amount was converted to.
    pub to_currency: Currency,
    /// Amount in the source currency.
    pub amount: Decimal,
    /// Amount in the target currency (`amount * exchange_rate`, unrounded).
    pub converted_amount: Decimal,
    /// Rate applied to the conversion.
    pub exchange_rate: Decimal,
    /// When the conversion was executed.
    pub executed_at: Timestamp,
}

impl TradeRecord {
    /// Create a new trade record with a fresh ID.
    pub fn new(
        from_currency: Currency,
        to_currency: Currency,
        amount: Decimal,
        converted_amount: Decimal,
        exchange_rate: Decimal,
        executed_at: Timestamp,
    ) -> Self {
        Self {
            id: TradeId::new(),
            from_currency,
            to_currency,
            amount,
            converted_amount,
            exchange_rate,
            executed_at,
        }
    }

    /// The directional pair this trade was executed on.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from_currency.clone(), self.to_currency.clone())
    }
}
