//! Exposure Ports
//!
//! Port definitions (traits) for the collaborators of the risk calculation.
//! These define the boundaries between domain logic and platform/infrastructure.

mod classifier;
mod clock;
mod error;
mod exposure;
mod store;

pub use classifier::RiskClassifier;
pub use clock::Clock;
pub use error::{StoreError, StoreResult};
pub use exposure::{ExposureAuthorization, KeyPackageStore, TracingHistorySource};
pub use store::RiskStore;
