//! Exposure Risk Calculator
//!
//! Turns platform exposure data into a discrete [`RiskLevel`]. A run:
//!
//! - **Policy checks**: permissions, downloaded keys, tracing duration and
//!   staleness, merged monotonically into a `Low` seed
//! - **Early exit**: any "cannot determine" level is returned as-is
//! - **Detection**: otherwise a detection run is triggered and its summary
//!   classified, merged and persisted
//!
//! ## Architecture
//!
//! ```text
//! start(cb) ──► queue ──► ┌──────────────────────────────────────────┐
//!                         │            Calculation Worker            │
//!                         │  (one run at a time, in enqueue order)   │
//!                         │                                          │
//!  Authorization ────────►│  PolicyChecks ──► EarlyExit ─────┐       │
//!  Key packages ─────────►│       │                          │       │
//!  Tracing history ──────►│       ▼                          │       │
//!  Risk store ◄──────────►│  AwaitingDetection ◄── signal ◄──┼── Detection
//!                         │       │  (timeout)               │   trigger
//!                         │       ▼                          ▼       │
//!                         │            Resolved ──► cb(result)       │
//!                         └──────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use exposure_calculator::{Collaborators, RiskCalculationConfig, RiskCalculator};
//!
//! let calculator = RiskCalculator::spawn(RiskCalculationConfig::default(), collaborators);
//!
//! calculator.start(|result| match result {
//!     Ok(level) => println!("risk level: {level}"),
//!     Err(e) => eprintln!("calculation failed: {e}"),
//! });
//!
//! // Or await the result directly
//! let level = calculator.calculate().await?;
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod run;

// Re-export main types
pub use calculator::RiskCalculator;
pub use config::{ConfigError, RiskCalculationConfig};
pub use error::{CalculationError, Result};
pub use exposure_core::RiskLevel;
pub use run::{Collaborators, RunState};
