//! One calculation run
//!
//! ```text
//! Start ──► PolicyChecks ──┬──► EarlyExit ─────────┐
//!                          │                       ▼
//!                          └──► AwaitingDetection ──► Resolved
//! ```
//!
//! A run reads every input once at `Start`, so no policy check observes
//! state written later in the same run.

use crate::error::{CalculationError, Result};
use exposure_core::RiskLevel;
use exposure_detection::{DetectionTrigger, ListenerRegistry};
use exposure_ports::{
    Clock, ExposureAuthorization, KeyPackageStore, RiskClassifier, RiskStore,
    TracingHistorySource,
};
use exposure_risk::{PolicyInputs, RiskPolicy};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// External collaborators of the calculator, injected at construction
#[derive(Clone)]
pub struct Collaborators {
    pub authorization: Arc<dyn ExposureAuthorization>,
    pub key_packages: Arc<dyn KeyPackageStore>,
    pub tracing: Arc<dyn TracingHistorySource>,
    pub store: Arc<dyn RiskStore>,
    pub classifier: Arc<dyn RiskClassifier>,
    pub trigger: Arc<dyn DetectionTrigger>,
    pub clock: Arc<dyn Clock>,
}

/// States of a calculation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    PolicyChecks,
    EarlyExit,
    AwaitingDetection,
    Resolved,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Everything a run needs, shared by all runs of one calculator
pub(crate) struct RunContext {
    pub collaborators: Collaborators,
    pub policy: RiskPolicy,
    pub detection_timeout: Duration,
    pub registry: ListenerRegistry,
}

/// A single calculation, from `Start` to `Resolved`
pub(crate) struct CalculationRun<'a> {
    id: Uuid,
    state: RunState,
    calculated: RiskLevel,
    ctx: &'a RunContext,
}

impl<'a> CalculationRun<'a> {
    pub fn new(ctx: &'a RunContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RunState::Start,
            calculated: RiskPolicy::SEED,
            ctx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Drive the run to `Resolved`
    pub async fn execute(mut self) -> Result<RiskLevel> {
        debug!("[RISK] Run {} started", self.id);

        let result = self.resolve().await;
        self.transition(RunState::Resolved);

        match &result {
            Ok(level) => info!("[RISK] Run {} resolved: {}", self.id, level),
            Err(e) => warn!("[RISK] Run {} failed: {}", self.id, e),
        }
        result
    }

    fn transition(&mut self, next: RunState) {
        debug!("[RISK] Run {}: {} -> {}", self.id, self.state, next);
        self.state = next;
    }

    async fn resolve(&mut self) -> Result<RiskLevel> {
        let ctx = self.ctx;
        let collaborators = &ctx.collaborators;

        // Start: one snapshot of every input
        let mut persisted = collaborators.store.load()?;
        let inputs = PolicyInputs {
            exposure_state: collaborators.authorization.snapshot(),
            inventory: collaborators.key_packages.inventory(),
            tracing_history: collaborators.tracing.tracing_history(),
            last_detection: persisted.date_last_exposure_detection,
            now: collaborators.clock.now(),
        };

        self.transition(RunState::PolicyChecks);
        let evaluation = ctx.policy.evaluate(&inputs);
        self.calculated = self.calculated.merge(evaluation.level);

        if self.calculated.is_terminal() {
            self.transition(RunState::EarlyExit);
            let failed: Vec<String> = evaluation
                .failed_checks()
                .map(|o| o.check.to_string())
                .collect();
            debug!(
                "[RISK] Run {} exits early with {} (failed checks: {})",
                self.id,
                self.calculated,
                failed.join(", ")
            );
            return Ok(self.calculated);
        }

        self.transition(RunState::AwaitingDetection);
        let (sink, listener) = ctx.registry.arm(self.id);

        debug!(
            "[RISK] Run {} triggering detection via {}",
            self.id,
            collaborators.trigger.name()
        );
        // One deadline covers handing the request off and waiting for the
        // signal; on expiry the future is dropped and the subscription with it
        let detection = async {
            collaborators.trigger.detect_exposures(sink).await?;
            let signal = listener.recv().await?;
            Ok::<_, CalculationError>(signal)
        };
        let signal = tokio::time::timeout(ctx.detection_timeout, detection)
            .await
            .map_err(|_| CalculationError::TimedOut {
                after: ctx.detection_timeout,
            })??;
        let summary = signal.into_result()?;

        let candidate = collaborators.classifier.classify(summary.maximum_risk_score);
        debug!(
            "[RISK] Run {} summary: max score {}, {} matched keys -> {}",
            self.id, summary.maximum_risk_score, summary.matched_key_count, candidate
        );
        self.calculated = self.calculated.merge(candidate);

        persisted.record_success(self.calculated, collaborators.clock.now());
        collaborators.store.save(&persisted)?;

        Ok(self.calculated)
    }
}
