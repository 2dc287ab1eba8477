//! Exposure Runner - Background risk refresh
//!
//! Keeps the risk level current without a user in the loop:
//!
//! - **Config**: one JSON document for the calculator and the schedule
//! - **Scheduler**: starts a calculation on every tick and records outcomes
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   start(cb)   ┌──────────────────────┐
//! │ BackgroundScheduler  │──────────────►│    RiskCalculator    │
//! │ (tokio interval)     │◄──────────────│  (serial worker)     │
//! └──────────┬───────────┘   cb(result)  └──────────────────────┘
//!            │
//!            ▼
//!     SchedulerStats
//! ```

pub mod config;
pub mod error;
pub mod scheduler;

// Re-export main types
pub use config::{RunnerConfig, SchedulerConfig};
pub use error::RunnerError;
pub use scheduler::{BackgroundScheduler, SchedulerHandle, SchedulerStats};
