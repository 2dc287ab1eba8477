//! Detection signal payloads

use exposure_core::{DetectionFailure, ExposureSummary};

/// Terminal signal of one detection run
///
/// Exactly one is delivered per run: the sink that carries it is consumed on
/// send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionSignal {
    /// Detection finished and produced a summary
    SummaryAvailable(ExposureSummary),
    /// Detection failed with a platform-reported reason
    Failed(DetectionFailure),
}

impl DetectionSignal {
    pub fn into_result(self) -> Result<ExposureSummary, DetectionFailure> {
        match self {
            DetectionSignal::SummaryAvailable(summary) => Ok(summary),
            DetectionSignal::Failed(reason) => Err(reason),
        }
    }
}

impl From<Result<ExposureSummary, DetectionFailure>> for DetectionSignal {
    fn from(result: Result<ExposureSummary, DetectionFailure>) -> Self {
        match result {
            Ok(summary) => DetectionSignal::SummaryAvailable(summary),
            Err(reason) => DetectionSignal::Failed(reason),
        }
    }
}
