//! Exchange service configuration.

use chrono::Duration;
use fxgate_rates::RateCacheConfig;

use crate::admission::AdmissionConfig;

/// Main exchange service configuration.
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfig {
    /// Rate cache configuration.
    pub cache: RateCacheConfig,
    /// Trade admission configuration.
    pub admission: AdmissionConfig,
}

impl ExchangeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(minutes) = std::env::var("FXGATE_RATE_TTL_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                config.cache.ttl = Duration::minutes(minutes);
            }
        }

        if let Ok(limit) = std::env::var("FXGATE_TRADE_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.admission.max_trades = limit;
            }
        }

        if let Ok(minutes) = std::env::var("FXGATE_TRADE_WINDOW_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                config.admission.window = Duration::minutes(minutes);
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache.ttl <= Duration::zero() {
            return Err("Rate TTL must be positive".to_string());
        }

        if self.admission.max_trades == 0 {
            return Err("Trade limit must be positive".to_string());
        }

        if self.admission.window <= Duration::zero() {
            return Err("Trade window must be positive".to_string());
        }

        Ok(())
    }
}
