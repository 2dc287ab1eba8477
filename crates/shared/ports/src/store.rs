use exposure_core::PersistentRiskState;

use crate::error::StoreResult;

/// Port for the durable risk state
///
/// The calculator reads the state once at the start of a run and writes it
/// once on the success path only.
pub trait RiskStore: Send + Sync {
    /// Load the current state (defaults for a fresh install)
    fn load(&self) -> StoreResult<PersistentRiskState>;

    /// Replace the stored state
    fn save(&self, state: &PersistentRiskState) -> StoreResult<()>;
}
