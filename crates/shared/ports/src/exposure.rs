use std::collections::BTreeSet;

use exposure_core::{DayId, ExposureState, KeyPackageInventory, TracingHistory};

/// Port for the platform authorization state
pub trait ExposureAuthorization: Send + Sync {
    /// Current authorization/enablement snapshot
    fn snapshot(&self) -> ExposureState;
}

/// Port for the downloaded diagnosis-key packages
pub trait KeyPackageStore: Send + Sync {
    /// Days with at least one downloaded package
    fn all_days(&self) -> BTreeSet<DayId>;

    /// Read-only inventory view built from [`KeyPackageStore::all_days`]
    fn inventory(&self) -> KeyPackageInventory {
        KeyPackageInventory::new(self.all_days())
    }
}

/// Port for the tracing enable/disable history
pub trait TracingHistorySource: Send + Sync {
    fn tracing_history(&self) -> TracingHistory;
}
