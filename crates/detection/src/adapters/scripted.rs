//! Scripted detection trigger
//!
//! Plays back a queue of outcomes, one per detection request. Used to
//! exercise the calculator against every platform behaviour, including a
//! platform that never answers.

use crate::error::TriggerError;
use crate::listener::DetectionSink;
use crate::signal::DetectionSignal;
use crate::trigger::DetectionTrigger;
use async_trait::async_trait;
use exposure_core::{DetectionFailure, ExposureSummary};
use log::debug;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// What the scripted platform does with one request
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Signal a summary asynchronously
    Summary(ExposureSummary),
    /// Signal a failure asynchronously
    Failure(DetectionFailure),
    /// Signal after a delay
    After(Duration, DetectionSignal),
    /// Keep the sink and never signal
    Stall,
    /// Drop the sink without signalling
    DropSink,
    /// Refuse the request outright
    Reject(String),
}

/// Detection trigger that replays [`ScriptedOutcome`]s in order
pub struct ScriptedTrigger {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    /// Used once the script is exhausted
    fallback: ScriptedOutcome,
    /// Sinks held by `Stall`
    stalled: Mutex<Vec<DetectionSink>>,
    triggered: AtomicUsize,
}

impl ScriptedTrigger {
    pub fn new(script: impl IntoIterator<Item = ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: ScriptedOutcome::Stall,
            stalled: Mutex::new(Vec::new()),
            triggered: AtomicUsize::new(0),
        }
    }

    /// Trigger that answers every request with `outcome`
    pub fn always(outcome: ScriptedOutcome) -> Self {
        Self::new([]).with_fallback(outcome)
    }

    /// Builder: outcome once the script is exhausted (default: stall)
    pub fn with_fallback(mut self, outcome: ScriptedOutcome) -> Self {
        self.fallback = outcome;
        self
    }

    /// Append an outcome to the script
    pub async fn push(&self, outcome: ScriptedOutcome) {
        self.script.lock().await.push_back(outcome);
    }

    /// Detection requests received so far
    pub fn trigger_count(&self) -> usize {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Stalled sinks whose listener is still waiting
    pub async fn stalled_listening(&self) -> usize {
        self.stalled
            .lock()
            .await
            .iter()
            .filter(|sink| sink.is_listening())
            .count()
    }

    async fn next_outcome(&self) -> ScriptedOutcome {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl DetectionTrigger for ScriptedTrigger {
    async fn detect_exposures(&self, sink: DetectionSink) -> Result<(), TriggerError> {
        self.triggered.fetch_add(1, Ordering::SeqCst);
        let outcome = self.next_outcome().await;
        debug!("[DETECTION] Scripted run {} -> {:?}", sink.run_id(), outcome);

        match outcome {
            ScriptedOutcome::Summary(summary) => {
                tokio::spawn(async move {
                    sink.summary_available(summary);
                });
            }
            ScriptedOutcome::Failure(reason) => {
                tokio::spawn(async move {
                    sink.detection_failed(reason);
                });
            }
            ScriptedOutcome::After(delay, signal) => {
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    sink.signal(signal);
                });
            }
            ScriptedOutcome::Stall => self.stalled.lock().await.push(sink),
            ScriptedOutcome::DropSink => drop(sink),
            ScriptedOutcome::Reject(reason) => return Err(TriggerError::Rejected(reason)),
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "ScriptedTrigger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenError;
    use crate::listener::ListenerRegistry;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_script_plays_in_order() {
        let trigger = ScriptedTrigger::new([
            ScriptedOutcome::Summary(ExposureSummary::new(dec!(1))),
            ScriptedOutcome::Failure(DetectionFailure::NotEnabled),
        ]);
        let registry = ListenerRegistry::new();

        let (sink, listener) = registry.arm(Uuid::new_v4());
        trigger.detect_exposures(sink).await.unwrap();
        assert!(matches!(
            listener.wait(Duration::from_secs(1)).await,
            Ok(DetectionSignal::SummaryAvailable(_))
        ));

        let (sink, listener) = registry.arm(Uuid::new_v4());
        trigger.detect_exposures(sink).await.unwrap();
        assert_eq!(
            listener.wait(Duration::from_secs(1)).await,
            Ok(DetectionSignal::Failed(DetectionFailure::NotEnabled))
        );

        assert_eq!(trigger.trigger_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stall_falls_back_after_script() {
        let trigger = ScriptedTrigger::new([]);
        let registry = ListenerRegistry::new();

        let (sink, listener) = registry.arm(Uuid::new_v4());
        trigger.detect_exposures(sink).await.unwrap();
        assert_eq!(trigger.stalled_listening().await, 1);

        let result = listener.wait(Duration::from_secs(5)).await;
        assert_eq!(result, Err(ListenError::TimedOut(Duration::from_secs(5))));
        assert_eq!(trigger.stalled_listening().await, 0);
    }

    #[tokio::test]
    async fn test_pushed_outcome_runs_before_fallback() {
        let trigger = ScriptedTrigger::always(ScriptedOutcome::Failure(DetectionFailure::Internal));
        trigger
            .push(ScriptedOutcome::Summary(ExposureSummary::new(dec!(7))))
            .await;
        let registry = ListenerRegistry::new();

        let (sink, listener) = registry.arm(Uuid::new_v4());
        trigger.detect_exposures(sink).await.unwrap();
        assert_eq!(
            listener.wait(Duration::from_secs(1)).await,
            Ok(DetectionSignal::SummaryAvailable(ExposureSummary::new(dec!(7))))
        );

        let (sink, listener) = registry.arm(Uuid::new_v4());
        trigger.detect_exposures(sink).await.unwrap();
        assert_eq!(
            listener.wait(Duration::from_secs(1)).await,
            Ok(DetectionSignal::Failed(DetectionFailure::Internal))
        );
    }

    #[tokio::test]
    async fn test_reject() {
        let trigger = ScriptedTrigger::always(ScriptedOutcome::Reject("busy".into()));
        let (sink, _listener) = ListenerRegistry::new().arm(Uuid::new_v4());

        let result = trigger.detect_exposures(sink).await;
        assert_eq!(result, Err(TriggerError::Rejected("busy".into())));
    }
}
