use serde::{Deserialize, Serialize};

use crate::values::RiskScore;

/// Result of a successful exposure detection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureSummary {
    /// Highest risk score across all matched exposures
    pub maximum_risk_score: RiskScore,
    /// Number of diagnosis keys that matched local proximity tokens
    pub matched_key_count: u32,
    /// Days since the most recent matched exposure, if any
    pub days_since_last_exposure: Option<u32>,
}

impl ExposureSummary {
    pub fn new(maximum_risk_score: RiskScore) -> Self {
        Self {
            maximum_risk_score,
            matched_key_count: 0,
            days_since_last_exposure: None,
        }
    }

    /// Builder: record matched keys and recency
    pub fn with_matches(mut self, matched_key_count: u32, days_since_last_exposure: u32) -> Self {
        self.matched_key_count = matched_key_count;
        self.days_since_last_exposure = Some(days_since_last_exposure);
        self
    }

    pub fn has_matches(&self) -> bool {
        self.matched_key_count > 0
    }
}
