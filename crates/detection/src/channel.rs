//! Tokio channel-based detection trigger
//!
//! Forwards detection requests over an mpsc channel to a [`DetectionResponder`]
//! that runs next to the platform bridge. No serialization - sinks are passed
//! directly.

use crate::error::TriggerError;
use crate::listener::DetectionSink;
use crate::signal::DetectionSignal;
use crate::trigger::DetectionTrigger;
use async_trait::async_trait;
use log::{debug, info};
use std::future::Future;
use tokio::sync::mpsc;

/// Channel-based trigger (client side)
#[derive(Clone)]
pub struct ChannelDetectionTrigger {
    tx: mpsc::Sender<DetectionSink>,
}

impl ChannelDetectionTrigger {
    /// Create a trigger/responder pair
    pub fn pair(capacity: usize) -> (Self, DetectionResponder) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, DetectionResponder { rx })
    }
}

#[async_trait]
impl DetectionTrigger for ChannelDetectionTrigger {
    async fn detect_exposures(&self, sink: DetectionSink) -> Result<(), TriggerError> {
        self.tx
            .send(sink)
            .await
            .map_err(|_| TriggerError::ChannelClosed)
    }

    fn name(&self) -> &str {
        "ChannelDetectionTrigger"
    }
}

/// Channel-based responder (platform side)
pub struct DetectionResponder {
    rx: mpsc::Receiver<DetectionSink>,
}

impl DetectionResponder {
    /// Receive the next detection request
    pub async fn next(&mut self) -> Option<DetectionSink> {
        self.rx.recv().await
    }

    /// Serve requests until every trigger is dropped
    ///
    /// `detect` performs one detection run and returns its terminal signal.
    pub async fn run<F, Fut>(&mut self, mut detect: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DetectionSignal>,
    {
        info!("[DETECTION] Responder started, listening for detection requests");

        while let Some(sink) = self.next().await {
            let run_id = sink.run_id();
            debug!("[DETECTION] Detection requested for run {}", run_id);

            let signal = detect().await;
            if sink.signal(signal) {
                debug!("[DETECTION] Signal delivered for run {}", run_id);
            }
        }

        info!("[DETECTION] Responder stopped: all triggers dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::ListenerRegistry;
    use exposure_core::{DetectionFailure, ExposureSummary};
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_request_reply() {
        let (trigger, mut responder) = ChannelDetectionTrigger::pair(4);
        let registry = ListenerRegistry::new();

        // Spawn responder task
        let handle = tokio::spawn(async move {
            if let Some(sink) = responder.next().await {
                sink.summary_available(ExposureSummary::new(dec!(42)));
            }
        });

        let (sink, listener) = registry.arm(Uuid::new_v4());
        trigger.detect_exposures(sink).await.unwrap();

        let signal = listener.wait(Duration::from_secs(1)).await.unwrap();
        assert_eq!(signal.into_result().unwrap().maximum_risk_score, dec!(42));

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_loop_serves_until_closed() {
        let (trigger, mut responder) = ChannelDetectionTrigger::pair(4);
        let registry = ListenerRegistry::new();

        let handle = tokio::spawn(async move {
            responder
                .run(|| async { DetectionSignal::Failed(DetectionFailure::Internal) })
                .await;
        });

        for _ in 0..2 {
            let (sink, listener) = registry.arm(Uuid::new_v4());
            trigger.detect_exposures(sink).await.unwrap();
            let signal = listener.wait(Duration::from_secs(1)).await.unwrap();
            assert_eq!(signal, DetectionSignal::Failed(DetectionFailure::Internal));
        }

        drop(trigger);
        handle.await.unwrap();
        assert_eq!(registry.active(), 0);
    }

    #[tokio::test]
    async fn test_closed_channel() {
        let (trigger, responder) = ChannelDetectionTrigger::pair(1);
        drop(responder);

        let (sink, _listener) = ListenerRegistry::new().arm(Uuid::new_v4());
        let result = trigger.detect_exposures(sink).await;
        assert_eq!(result, Err(TriggerError::ChannelClosed));
    }
}
