//! Exposure Core Domain
//!
//! Pure domain types for the exposure risk calculation pipeline.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Platform inputs
    AuthorizationStatus,
    DetectionFailure,
    ExposureState,
    ExposureSummary,
    KeyPackageInventory,
    // Persistent state
    PersistentRiskState,
    // Risk scale
    RiskLevel,
    TracingHistory,
    TracingPeriod,
};
pub use values::{DayId, RiskScore, Timestamp};
