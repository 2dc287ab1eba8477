//! Background Scheduler - Starts a risk calculation on every tick
//!
//! The scheduler never waits for a calculation: each tick calls
//! `RiskCalculator::start` and the completion callback records the outcome.
//! Overlapping runs queue up in the calculator's worker.

use crate::config::SchedulerConfig;
use crate::error::RunnerError;
use exposure_calculator::{CalculationError, RiskCalculator, RiskLevel};
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Outcomes observed by the scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Calculations started
    pub ticks: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Level from the latest successful run
    pub last_level: Option<RiskLevel>,
    /// Error from the latest failed run
    pub last_error: Option<CalculationError>,
    /// The latest run failed for a reason only the user can fix (access,
    /// enablement, storage); cleared by the next success
    pub needs_user_action: bool,
}

impl SchedulerStats {
    /// Runs started but not yet completed
    pub fn in_flight(&self) -> u64 {
        self.ticks - self.succeeded - self.failed
    }

    fn record(&mut self, result: Result<RiskLevel, CalculationError>) {
        match result {
            Ok(level) => {
                self.succeeded += 1;
                self.last_level = Some(level);
                self.needs_user_action = false;
            }
            Err(e) => {
                self.failed += 1;
                self.needs_user_action = e
                    .detection_failure()
                    .is_some_and(|reason| reason.is_user_resolvable());
                self.last_error = Some(e);
            }
        }
    }
}

type SharedStats = Arc<Mutex<SchedulerStats>>;

fn lock_stats(stats: &SharedStats) -> std::sync::MutexGuard<'_, SchedulerStats> {
    stats.lock().unwrap_or_else(|p| p.into_inner())
}

/// Periodic caller of [`RiskCalculator::start`]
pub struct BackgroundScheduler {
    config: SchedulerConfig,
    calculator: Arc<RiskCalculator>,
    stats: SharedStats,
}

impl BackgroundScheduler {
    pub fn new(config: SchedulerConfig, calculator: Arc<RiskCalculator>) -> Result<Self, RunnerError> {
        config.validate()?;
        Ok(Self {
            config,
            calculator,
            stats: Arc::default(),
        })
    }

    /// Spawn the tick loop
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let stats = self.stats.clone();
        let task = tokio::spawn(self.run(shutdown_rx));

        SchedulerHandle {
            shutdown_tx,
            task,
            stats,
        }
    }

    async fn run(self, mut shutdown_rx: oneshot::Receiver<()>) {
        let period = self.config.interval();
        info!("[SCHEDULER] Background refresh started ({:?} interval)", period);

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    debug!("[SCHEDULER] Shutdown requested");
                    break;
                }

                _ = ticker.tick() => self.tick(),
            }
        }

        info!("[SCHEDULER] Background refresh stopped");
    }

    fn tick(&self) {
        let tick = {
            let mut stats = lock_stats(&self.stats);
            stats.ticks += 1;
            stats.ticks
        };
        debug!("[SCHEDULER] Tick {}: starting risk calculation", tick);

        let stats = self.stats.clone();
        self.calculator.start(move |result| {
            match &result {
                Ok(level) => info!("[SCHEDULER] Tick {} resolved risk level {}", tick, level),
                Err(CalculationError::Detection(reason)) if reason.is_user_resolvable() => {
                    warn!("[SCHEDULER] Tick {} needs user action: {}", tick, reason)
                }
                Err(CalculationError::WorkerStopped) => {
                    error!("[SCHEDULER] Tick {}: calculator is not running", tick)
                }
                Err(e) => warn!("[SCHEDULER] Tick {} failed: {}", tick, e),
            }
            lock_stats(&stats).record(result);
        });
    }
}

/// Handle to a running [`BackgroundScheduler`]
pub struct SchedulerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    stats: SharedStats,
}

impl SchedulerHandle {
    pub fn stats(&self) -> SchedulerStats {
        lock_stats(&self.stats).clone()
    }

    /// Stop ticking; calculations already started still complete
    pub async fn shutdown(self) -> SchedulerStats {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            error!("[SCHEDULER] Tick loop terminated abnormally: {}", e);
        }
        lock_stats(&self.stats).clone()
    }
}
