mod detection_failure;
mod exposure_state;
mod key_package;
mod risk_level;
mod risk_state;
mod summary;
mod tracing;

pub use detection_failure::DetectionFailure;
pub use exposure_state::{AuthorizationStatus, ExposureState};
pub use key_package::KeyPackageInventory;
pub use risk_level::RiskLevel;
pub use risk_state::PersistentRiskState;
pub use summary::ExposureSummary;
pub use tracing::{TracingHistory, TracingPeriod};
