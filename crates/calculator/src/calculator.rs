//! Risk Calculator
//!
//! Owns the serial worker that executes calculation runs:
//! - `start()` enqueues a run and returns immediately
//! - One run executes at a time, in enqueue order
//! - Every `start()` gets exactly one completion call

use crate::config::RiskCalculationConfig;
use crate::error::{CalculationError, Result};
use crate::run::{CalculationRun, Collaborators, RunContext};
use exposure_core::RiskLevel;
use exposure_detection::ListenerRegistry;
use log::{debug, error, info};
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

type Callback = Box<dyn FnOnce(Result<RiskLevel>) + Send + 'static>;

/// Completion callback that fires exactly once
///
/// If it is dropped without being completed (worker gone, queue discarded),
/// it fires with [`CalculationError::WorkerStopped`].
struct Completion {
    callback: Option<Callback>,
}

impl Completion {
    fn new<F>(on_complete: F) -> Self
    where
        F: FnOnce(Result<RiskLevel>) + Send + 'static,
    {
        Self {
            callback: Some(Box::new(on_complete)),
        }
    }

    fn complete(mut self, result: Result<RiskLevel>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(Err(CalculationError::WorkerStopped));
        }
    }
}

/// Risk calculation orchestrator
pub struct RiskCalculator {
    config: RiskCalculationConfig,
    queue: Mutex<Option<mpsc::UnboundedSender<Completion>>>,
    worker: JoinHandle<()>,
    registry: ListenerRegistry,
}

impl RiskCalculator {
    /// Create the calculator and spawn its worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: RiskCalculationConfig, collaborators: Collaborators) -> Self {
        let registry = ListenerRegistry::new();
        let ctx = RunContext {
            collaborators,
            policy: config.policy(),
            detection_timeout: config.detection_timeout(),
            registry: registry.clone(),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(Self::run_worker(rx, ctx));

        Self {
            config,
            queue: Mutex::new(Some(tx)),
            worker,
            registry,
        }
    }

    /// Enqueue a calculation run
    ///
    /// `on_complete` is invoked exactly once, on the worker, with the run's
    /// result. After [`RiskCalculator::close`] it is invoked immediately with
    /// [`CalculationError::WorkerStopped`].
    pub fn start<F>(&self, on_complete: F)
    where
        F: FnOnce(Result<RiskLevel>) + Send + 'static,
    {
        let completion = Completion::new(on_complete);
        // Clone the sender so no lock is held while a callback runs
        let queue = self
            .queue
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        match queue {
            Some(tx) => {
                if let Err(mpsc::error::SendError(rejected)) = tx.send(completion) {
                    error!("[RISK] Calculation worker is gone, rejecting run");
                    rejected.complete(Err(CalculationError::WorkerStopped));
                }
            }
            None => {
                debug!("[RISK] Calculator closed, rejecting run");
                completion.complete(Err(CalculationError::WorkerStopped));
            }
        }
    }

    /// Run a calculation and wait for its result
    pub async fn calculate(&self) -> Result<RiskLevel> {
        let (tx, rx) = oneshot::channel();
        self.start(move |result| {
            let _ = tx.send(result);
        });
        rx.await.unwrap_or(Err(CalculationError::WorkerStopped))
    }

    /// Stop accepting runs; already queued runs still complete
    pub fn close(&self) {
        let mut queue = self.queue.lock().unwrap_or_else(|p| p.into_inner());
        if queue.take().is_some() {
            info!("[RISK] Calculator closed");
        }
    }

    /// Close and wait for the queued runs to finish
    pub async fn shutdown(self) {
        self.close();
        if let Err(e) = self.worker.await {
            error!("[RISK] Calculation worker terminated abnormally: {}", e);
        }
    }

    pub fn config(&self) -> &RiskCalculationConfig {
        &self.config
    }

    /// Registry of detection listeners armed by this calculator's runs
    pub fn listener_registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    async fn run_worker(mut rx: mpsc::UnboundedReceiver<Completion>, ctx: RunContext) {
        info!("[RISK] Calculation worker started");

        while let Some(completion) = rx.recv().await {
            let run = CalculationRun::new(&ctx);
            debug!("[RISK] Dequeued run {}", run.id());
            let result = run.execute().await;
            completion.complete(result);
        }

        info!("[RISK] Calculation worker stopped");
    }
}
