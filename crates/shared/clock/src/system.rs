use chrono::Utc;
use exposure_core::Timestamp;
use exposure_ports::Clock;

/// Wall-clock UTC time
///
/// Staleness and tracing-duration checks see the device's current time, so a
/// user changing the system clock moves both.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
