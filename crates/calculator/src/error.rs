//! Calculation errors

use exposure_core::DetectionFailure;
use exposure_detection::{ListenError, TriggerError};
use exposure_ports::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Failure branch of a calculation run
///
/// Low-confidence risk levels (`Inactive`, `UnknownInitial`,
/// `UnknownOutdated`) are successes, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// Reported by the platform detection run, passed through verbatim
    #[error("Exposure detection failed: {0}")]
    Detection(#[from] DetectionFailure),

    /// The detection run neither succeeded nor failed in time
    #[error("Exposure detection timed out after {after:?}")]
    TimedOut { after: Duration },

    /// The detection trigger dropped its sink without signalling
    #[error("Exposure detection ended without a signal")]
    SignalDropped,

    /// The detection trigger refused the request
    #[error("Exposure detection could not be started: {0}")]
    Trigger(#[from] TriggerError),

    /// Reading or writing the persistent risk state failed
    #[error("Risk state store error: {0}")]
    Store(#[from] StoreError),

    /// The calculation worker is no longer running
    #[error("Risk calculation worker stopped")]
    WorkerStopped,
}

impl CalculationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CalculationError::TimedOut { .. })
    }

    /// The platform-reported reason, if this is a detection failure
    pub fn detection_failure(&self) -> Option<DetectionFailure> {
        match self {
            CalculationError::Detection(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<ListenError> for CalculationError {
    fn from(error: ListenError) -> Self {
        match error {
            ListenError::TimedOut(after) => CalculationError::TimedOut { after },
            ListenError::SignalDropped => CalculationError::SignalDropped,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculationError>;
