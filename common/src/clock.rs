//! Time access for expiry decisions and record timestamps.
//!
//! Components never read the wall clock directly; they hold a
//! [`SharedClock`] so that every TTL and window-expiry decision is
//! deterministic under test.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Timestamp used across fxgate (UTC).
pub type Timestamp = DateTime<Utc>;

/// Shared handle to a clock implementation.
pub type SharedClock = Arc<dyn Clock>;

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time, used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually driven clock for deterministic expiry tests.
///
/// Time stands still until a test calls [`ManualClock::advance`] or
/// [`ManualClock::set`].
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
pub struct ManualClock {
    current: parking_lot::Mutex<Timestamp>,
}

#[cfg(any(test, feature = "test-utils"))]
impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: parking_lot::Mutex::new(start),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut current = self.current.lock();
        *current = *current + delta;
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, to: Timestamp) {
        *self.current.lock() = to;
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new(Utc::now());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now(), start + Duration::minutes(30));

        let target = start + Duration::hours(2);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
