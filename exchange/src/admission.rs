//! Per-client trade admission control.

use chrono::Duration;
use dashmap::DashMap;
use fxgate_common::{ClientId, SharedClock, Timestamp};
use tracing::debug;

/// Per-client counter window.
#[derive(Debug, Clone)]
struct ClientWindow {
    count: u32,
    expires_at: Timestamp,
}

/// Configuration for trade admission.
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    /// Maximum trades per window.
    pub max_trades: u32,
    /// Window length; every recorded trade re-arms it.
    pub window: Duration,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_trades: 10,
            window: Duration::minutes(60),
        }
    }
}

/// Tracks per-client trade counts within sliding-timeout windows.
///
/// A window behaves like a cache entry whose TTL is re-set on every recorded
/// trade: trading keeps it alive, and only a full quiet `window` lets the
/// counter lapse.
pub struct AdmissionController {
    counters: DashMap<ClientId, ClientWindow>,
    config: AdmissionConfig,
    clock: SharedClock,
}

impl AdmissionController {
    /// Create a new admission controller.
    pub fn new(config: AdmissionConfig, clock: SharedClock) -> Self {
        Self {
            counters: DashMap::new(),
            config,
            clock,
        }
    }

    /// Check whether the client may trade right now. Never mutates state.
    ///
    /// A client with no window, or whose window has lapsed, is allowed.
    pub fn is_allowed(&self, client: &ClientId) -> bool {
        match self.counters.get(client) {
            Some(window) if !self.is_expired(&window) => window.count < self.config.max_trades,
            _ => true,
        }
    }

    /// Record a successfully executed trade for the client.
    ///
    /// Opens a fresh window when none is live, otherwise increments the
    /// counter. Either way the expiry is re-armed to a full `window` from
    /// now. The whole read-modify-write is atomic per client.
    pub fn record_trade(&self, client: &ClientId) {
        let now = self.clock.now();
        let expires_at = now + self.config.window;

        let mut entry = self
            .counters
            .entry(client.clone())
            .or_insert_with(|| ClientWindow {
                count: 0,
                expires_at,
            });

        if entry.expires_at <= now {
            // Window lapsed between trades; start over.
            entry.count = 0;
        }
        entry.count += 1;
        entry.expires_at = expires_at;

        debug!(client = %client, count = entry.count, "Trade recorded");
    }

    /// Remaining life of the client's live window, if any.
    ///
    /// `None` means no live window: the quota is clear. After a refusal this
    /// is how long the client has to wait.
    pub fn retry_after(&self, client: &ClientId) -> Option<Duration> {
        let window = self.counters.get(client)?;
        let remaining = window.expires_at.signed_duration_since(self.clock.now());

        if remaining <= Duration::zero() {
            None
        } else {
            Some(remaining)
        }
    }

    /// Drop all lapsed windows. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.counters.len();
        self.counters.retain(|_, window| window.expires_at > now);
        before.saturating_sub(self.counters.len())
    }

    /// Get admission statistics.
    pub fn stats(&self) -> AdmissionStats {
        let now = self.clock.now();
        let total = self.counters.len();
        let live = self
            .counters
            .iter()
            .filter(|entry| entry.value().expires_at > now)
            .count();

        AdmissionStats {
            tracked_clients: total,
            live_windows: live,
        }
    }

    fn is_expired(&self, window: &ClientWindow) -> bool {
        window.expires_at <= self.clock.now()
    }
}

/// Admission statistics.
#[derive(Debug, Clone)]
pub struct AdmissionStats {
    pub tracked_clients: usize,
    pub live_windows: usize,
}
