use chrono::{Duration, Utc};
use exposure_core::Timestamp;
use exposure_ports::Clock;
use std::sync::{Arc, RwLock};

/// Frozen clock for deterministic tests
///
/// Time never moves on its own; use [`ManualClock::advance`] or
/// [`ManualClock::set_time`]. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    current_time: Arc<RwLock<Timestamp>>,
}

impl ManualClock {
    /// Create a clock frozen at the current wall time
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Create a clock frozen at `time`
    pub fn starting_at(time: Timestamp) -> Self {
        Self {
            current_time: Arc::new(RwLock::new(time)),
        }
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += duration;
    }

    /// Explicitly set the time
    ///
    /// Warning: this can move time backwards.
    pub fn set_time(&self, time: Timestamp) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = time;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self
            .current_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_is_frozen() {
        let clock = ManualClock::new();
        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(clock.now(), time1);
    }

    #[test]
    fn test_advance_and_set() {
        let start = Utc.with_ymd_and_hms(2020, 6, 16, 12, 0, 0).unwrap();
        let clock = ManualClock::starting_at(start);

        clock.advance(Duration::hours(24));
        assert_eq!(clock.now() - start, Duration::hours(24));

        clock.set_time(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(Duration::minutes(5));
        assert_eq!(view.now(), clock.now());
    }
}
