use exposure_core::{RiskLevel, RiskScore};
use exposure_ports::RiskClassifier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maps a detection's maximum risk score to `Low` or `High`
///
/// Scores at or above `high_threshold` are `High`. Monotonic by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdClassifier {
    high_threshold: RiskScore,
}

impl ThresholdClassifier {
    /// Default threshold for the platform's 0-255 maximum risk score
    pub const DEFAULT_HIGH_THRESHOLD: Decimal = dec!(15);

    pub fn new(high_threshold: RiskScore) -> Self {
        Self { high_threshold }
    }

    pub fn high_threshold(&self) -> RiskScore {
        self.high_threshold
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HIGH_THRESHOLD)
    }
}

impl RiskClassifier for ThresholdClassifier {
    fn classify(&self, score: RiskScore) -> RiskLevel {
        if score >= self.high_threshold {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}
