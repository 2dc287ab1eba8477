//! Exposure Store
//!
//! Adapters for the ports the risk calculation consumes:
//!
//! | Port | Adapter |
//! |------|---------|
//! | `RiskStore` | [`InMemoryRiskStore`], [`JsonFileRiskStore`] |
//! | `KeyPackageStore` | [`InMemoryKeyPackageStore`] |
//! | `TracingHistorySource` | [`InMemoryTracingHistory`] |
//! | `ExposureAuthorization` | [`SharedAuthorization`] |

mod authorization;
mod json;
mod memory;

pub use authorization::SharedAuthorization;
pub use json::JsonFileRiskStore;
pub use memory::{InMemoryKeyPackageStore, InMemoryRiskStore, InMemoryTracingHistory};
