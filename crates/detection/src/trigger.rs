//! Detection trigger port
//!
//! The trigger is the boundary to the platform exposure-detection API. It is
//! fire-and-forget: it accepts the sink and returns; the platform later
//! resolves the sink with exactly one [`DetectionSignal`](crate::DetectionSignal).

use crate::error::TriggerError;
use crate::listener::DetectionSink;
use async_trait::async_trait;

/// Starts an exposure detection run
#[async_trait]
pub trait DetectionTrigger: Send + Sync {
    /// Hand off a detection request; must not wait for the result
    async fn detect_exposures(&self, sink: DetectionSink) -> Result<(), TriggerError>;

    /// Trigger name for logging
    fn name(&self) -> &str {
        "DetectionTrigger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ensure the trait is object-safe
    fn _assert_trigger_object_safe(_: &dyn DetectionTrigger) {}
}
