//! Exposure Clock Infrastructure
//!
//! Provides time abstractions for production and tests:
//!
//! - [`SystemClock`]: wall-clock time
//! - [`ManualClock`]: frozen time that only moves when told to
//!
//! ## Usage
//!
//! ```ignore
//! use exposure_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::starting_at(detection_time);
//! clock.advance(Duration::hours(24)); // exactly at the staleness boundary
//! assert_eq!(clock.now(), detection_time + Duration::hours(24));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use exposure_ports::Clock;
