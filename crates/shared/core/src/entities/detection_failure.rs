use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the platform detection run
///
/// Propagated verbatim to the caller; never downgraded to a risk level.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetectionFailure {
    #[error("Exposure notification access is not authorized")]
    NotAuthorized,

    #[error("Exposure notification is not enabled")]
    NotEnabled,

    #[error("Detection rate limit reached")]
    RateLimited,

    #[error("Detection was called with a bad parameter")]
    BadParameter,

    #[error("Insufficient storage for detection")]
    InsufficientStorage,

    #[error("Exposure notification is unsupported on this device")]
    Unsupported,

    #[error("Exposure notification is restricted by device policy")]
    Restricted,

    #[error("Internal platform error")]
    Internal,

    #[error("Unknown detection error")]
    Unknown,
}

impl DetectionFailure {
    /// Failures the user can resolve by changing a setting
    pub fn is_user_resolvable(&self) -> bool {
        matches!(
            self,
            DetectionFailure::NotAuthorized
                | DetectionFailure::NotEnabled
                | DetectionFailure::InsufficientStorage
        )
    }
}
