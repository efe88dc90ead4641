//! Time source for token derivation.
//!
//! Tokens are unique only because their timestamps are. A wall clock read
//! twice within one tick returns the same value, and on some platforms a
//! tick is a whole microsecond. [`SystemClock`] papers over that by never
//! returning a value it has returned before.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies nanosecond timestamps for token derivation.
///
/// A trait rather than a direct `SystemTime` call so tests can pin time
/// (to force collisions, or to reproduce a known token).
///
/// `Send + Sync + 'static` because one clock is shared by every request
/// task for the life of the server.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time as signed nanoseconds since the UNIX epoch.
    fn now_nanos(&self) -> i64;
}

/// Wall-clock nanoseconds since the UNIX epoch.
///
/// Saturates at `i64::MAX` (the year 2262). Times before the epoch come back
/// negative.
pub fn unix_nanos() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_nanos()).unwrap_or(i64::MAX),
        Err(before) => {
            i64::try_from(before.duration().as_nanos()).map_or(i64::MIN, |n| -n)
        }
    }
}

/// The production clock: wall time, strictly increasing within the process.
///
/// Each call returns `max(wall_now, last + 1)`. Under a burst of concurrent
/// issuances the returned values run slightly ahead of the wall clock, then
/// fall back in line once the burst is over.
#[derive(Debug)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(i64::MIN),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        let wall = unix_nanos();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = if wall > prev { wall } else { prev.saturating_add(1) };
            match self.last.compare_exchange_weak(
                prev,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_unix_nanos_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(unix_nanos() > 1_577_836_800_000_000_000);
    }

    #[test]
    fn test_system_clock_strictly_increasing() {
        let clock = SystemClock::new();
        let mut prev = clock.now_nanos();
        for _ in 0..10_000 {
            let next = clock.now_nanos();
            assert!(next > prev, "{next} should be > {prev}");
            prev = next;
        }
    }

    #[test]
    fn test_system_clock_unique_across_threads() {
        let clock = Arc::new(SystemClock::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || {
                    (0..1_000).map(|_| clock.now_nanos()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for ts in handle.join().expect("thread panicked") {
                assert!(seen.insert(ts), "duplicate timestamp {ts}");
            }
        }
        assert_eq!(seen.len(), 8_000);
    }
}
