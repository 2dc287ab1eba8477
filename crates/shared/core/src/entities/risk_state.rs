use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::values::Timestamp;

/// Durable risk state, persisted across launches
///
/// Only a successful calculation run writes this; every failure path leaves
/// it untouched, so it always reflects the last successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentRiskState {
    pub date_last_exposure_detection: Option<Timestamp>,
    pub last_risk_level: RiskLevel,
}

impl PersistentRiskState {
    /// Record the outcome of a successful run
    pub fn record_success(&mut self, level: RiskLevel, detected_at: Timestamp) {
        self.last_risk_level = level;
        self.date_last_exposure_detection = Some(detected_at);
    }
}
