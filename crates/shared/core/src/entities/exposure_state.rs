use serde::{Deserialize, Serialize};

/// Authorization status of the platform exposure-notification API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    #[default]
    Unknown,
    /// The user granted access
    Authorized,
    /// The user denied access
    NotAuthorized,
    /// Access is blocked by device policy
    Restricted,
}

/// Snapshot of the platform permission state, taken once per calculation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExposureState {
    pub authorization: AuthorizationStatus,
    /// Whether exposure logging is switched on
    pub enabled: bool,
}

impl ExposureState {
    pub fn new(authorization: AuthorizationStatus, enabled: bool) -> Self {
        Self {
            authorization,
            enabled,
        }
    }

    /// Authorized and enabled
    pub fn active() -> Self {
        Self::new(AuthorizationStatus::Authorized, true)
    }

    /// True iff the API is authorized and enabled
    pub fn is_good(&self) -> bool {
        self.authorization == AuthorizationStatus::Authorized && self.enabled
    }
}
