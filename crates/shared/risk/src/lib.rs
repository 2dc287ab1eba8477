//! Exposure Risk Policy
//!
//! Pure policy predicates that gate a risk calculation run, and the
//! score-to-level classifier applied to a detection summary.

mod classifier;
pub mod policy;

pub use classifier::ThresholdClassifier;
pub use policy::{
    PolicyCheck, PolicyEvaluation, PolicyInputs, PolicyOutcome, RiskPolicy, TracingDurationMode,
    check_downloaded_keys, check_permissions, check_staleness, check_tracing_duration,
};
