use exposure_core::{RiskLevel, RiskScore};

/// Port for the configured score-to-level mapping
///
/// Implementations must be monotonic: a higher score never maps to a lower
/// determined level. Only `Low` and `High` are meaningful outputs.
pub trait RiskClassifier: Send + Sync {
    fn classify(&self, score: RiskScore) -> RiskLevel;
}
