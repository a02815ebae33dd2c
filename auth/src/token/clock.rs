use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Source of the current time for token issuance and expiry checks.
///
/// Token makers read time through this trait instead of calling `Utc::now`
/// directly, so tests can issue tokens at one instant and verify them at
/// another without sleeping.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
///
/// Stores the instant as microseconds since the Unix epoch so it can be
/// shared across threads without locking.
#[derive(Debug)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            micros: AtomicI64::new(now.timestamp_micros()),
        }
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        self.micros.store(now.timestamp_micros(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, with a negative duration).
    pub fn advance(&self, delta: Duration) {
        self.micros
            .fetch_add(delta.num_microseconds().unwrap_or(i64::MAX), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.micros.load(Ordering::SeqCst))
            .unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_real_time() {
        let clock = SystemClock;

        let before = Utc::now();
        let observed = clock.now();
        let after = Utc::now();

        assert!(observed >= before);
        assert!(observed <= after);
    }

    #[test]
    fn test_manual_clock_stays_put() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now().timestamp_micros(), start.timestamp_micros());
        assert_eq!(clock.now().timestamp_micros(), start.timestamp_micros());
    }

    #[test]
    fn test_manual_clock_advance() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        clock.advance(Duration::minutes(16));

        let expected = start + Duration::minutes(16);
        assert_eq!(clock.now().timestamp_micros(), expected.timestamp_micros());
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new(Utc::now());
        let target = Utc::now() + Duration::days(30);

        clock.set(target);

        assert_eq!(clock.now().timestamp_micros(), target.timestamp_micros());
    }
}
