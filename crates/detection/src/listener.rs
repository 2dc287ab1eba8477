//! One-shot summary listeners
//!
//! A run arms a listener through the [`ListenerRegistry`], hands the
//! [`DetectionSink`] to the detection trigger, then waits on the
//! [`SummaryListener`]. The listener holds a subscription guard that is
//! released however the wait ends (signal, timeout, dropped sink, or the
//! listener itself being dropped), so repeated runs never leak listeners.

use crate::error::ListenError;
use crate::signal::DetectionSignal;
use exposure_core::{DetectionFailure, ExposureSummary};
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;

/// Tracks armed listeners
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<AtomicUsize>,
    armed_total: Arc<AtomicU64>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-shot subscription for the run `run_id`
    pub fn arm(&self, run_id: Uuid) -> (DetectionSink, SummaryListener) {
        let (tx, rx) = oneshot::channel();
        self.active.fetch_add(1, Ordering::SeqCst);
        self.armed_total.fetch_add(1, Ordering::SeqCst);
        debug!("[DETECTION] Listener armed for run {}", run_id);

        let sink = DetectionSink { run_id, tx };
        let listener = SummaryListener {
            run_id,
            rx,
            _subscription: Subscription {
                run_id,
                active: self.active.clone(),
            },
        };
        (sink, listener)
    }

    /// Listeners currently armed and not yet released
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Listeners ever armed through this registry
    pub fn armed_total(&self) -> u64 {
        self.armed_total.load(Ordering::SeqCst)
    }
}

/// Releases its registry slot on drop
struct Subscription {
    run_id: Uuid,
    active: Arc<AtomicUsize>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
        debug!("[DETECTION] Listener released for run {}", self.run_id);
    }
}

/// Sending half handed to the detection trigger
///
/// Consumed by whichever terminal signal is sent, so a run can be resolved
/// at most once. Dropping it unsent resolves the run as
/// [`ListenError::SignalDropped`].
#[derive(Debug)]
pub struct DetectionSink {
    run_id: Uuid,
    tx: oneshot::Sender<DetectionSignal>,
}

impl DetectionSink {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// False once the listener gave up (timeout) or was dropped
    pub fn is_listening(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Deliver "summary available"; returns false if nobody was listening
    pub fn summary_available(self, summary: ExposureSummary) -> bool {
        self.signal(DetectionSignal::SummaryAvailable(summary))
    }

    /// Deliver "detection failed"; returns false if nobody was listening
    pub fn detection_failed(self, reason: DetectionFailure) -> bool {
        self.signal(DetectionSignal::Failed(reason))
    }

    /// Deliver a terminal signal; returns false if nobody was listening
    pub fn signal(self, signal: DetectionSignal) -> bool {
        match self.tx.send(signal) {
            Ok(()) => true,
            Err(late) => {
                warn!(
                    "[DETECTION] Run {} no longer listening, discarding late signal: {:?}",
                    self.run_id, late
                );
                false
            }
        }
    }
}

/// Receiving half owned by the calculation run
pub struct SummaryListener {
    run_id: Uuid,
    rx: oneshot::Receiver<DetectionSignal>,
    _subscription: Subscription,
}

impl SummaryListener {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Wait for the terminal signal, at most `timeout`
    ///
    /// Consumes the listener: the subscription is released on return.
    pub async fn wait(self, timeout: Duration) -> Result<DetectionSignal, ListenError> {
        tokio::time::timeout(timeout, self.recv())
            .await
            .unwrap_or(Err(ListenError::TimedOut(timeout)))
    }

    /// Wait for the terminal signal without a bound of its own
    ///
    /// For callers that put a single deadline over more than the wait. The
    /// subscription is released when the returned future completes or is
    /// dropped.
    pub async fn recv(self) -> Result<DetectionSignal, ListenError> {
        self.rx.await.map_err(|_| ListenError::SignalDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_summary_resolves_listener() {
        let registry = ListenerRegistry::new();
        let (sink, listener) = registry.arm(Uuid::new_v4());
        assert_eq!(registry.active(), 1);

        assert!(sink.summary_available(ExposureSummary::new(dec!(3))));

        let signal = listener.wait(Duration::from_secs(1)).await.unwrap();
        assert_eq!(signal, DetectionSignal::SummaryAvailable(ExposureSummary::new(dec!(3))));
        assert_eq!(registry.active(), 0);
    }

    #[tokio::test]
    async fn test_failure_resolves_listener() {
        let registry = ListenerRegistry::new();
        let (sink, listener) = registry.arm(Uuid::new_v4());

        sink.detection_failed(DetectionFailure::RateLimited);

        let signal = listener.wait(Duration::from_secs(1)).await.unwrap();
        assert_eq!(signal, DetectionSignal::Failed(DetectionFailure::RateLimited));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_releases_subscription() {
        let _ = env_logger::builder().is_test(true).try_init();
        let registry = ListenerRegistry::new();
        let (sink, listener) = registry.arm(Uuid::new_v4());

        let result = listener.wait(Duration::from_secs(30)).await;
        assert_eq!(result, Err(ListenError::TimedOut(Duration::from_secs(30))));
        assert_eq!(registry.active(), 0);

        // A late signal is discarded, not delivered
        assert!(!sink.is_listening());
        assert!(!sink.summary_available(ExposureSummary::new(dec!(1))));
    }

    #[tokio::test]
    async fn test_dropped_sink() {
        let registry = ListenerRegistry::new();
        let (sink, listener) = registry.arm(Uuid::new_v4());
        drop(sink);

        let result = listener.wait(Duration::from_secs(1)).await;
        assert_eq!(result, Err(ListenError::SignalDropped));
        assert_eq!(registry.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outer_deadline_releases_subscription() {
        let registry = ListenerRegistry::new();
        let (_sink, listener) = registry.arm(Uuid::new_v4());

        let result = tokio::time::timeout(Duration::from_secs(10), listener.recv()).await;
        assert!(result.is_err());
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn test_dropping_listener_releases_subscription() {
        let registry = ListenerRegistry::new();
        let (_sink, listener) = registry.arm(Uuid::new_v4());
        drop(listener);

        assert_eq!(registry.active(), 0);
        assert_eq!(registry.armed_total(), 1);
    }
}
