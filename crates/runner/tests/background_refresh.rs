//! Background Refresh Integration Test
//!
//! Runs the scheduler against a real calculator on paused tokio time:
//! - One calculation per tick, the first immediately
//! - Outcomes recorded from completion callbacks
//! - Shutdown stops ticking

use chrono::{Duration as ChronoDuration, NaiveDate, TimeZone, Utc};
use exposure_calculator::{
    CalculationError, Collaborators, RiskCalculationConfig, RiskCalculator, RiskLevel,
};
use exposure_clock::ManualClock;
use exposure_core::{
    DetectionFailure, ExposureState, ExposureSummary, PersistentRiskState, TracingHistory,
};
use exposure_detection::{ScriptedOutcome, ScriptedTrigger};
use exposure_risk::ThresholdClassifier;
use exposure_runner::{BackgroundScheduler, RunnerError, SchedulerConfig};
use exposure_store::{
    InMemoryKeyPackageStore, InMemoryRiskStore, InMemoryTracingHistory, SharedAuthorization,
};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

fn calculator_with(trigger: Arc<ScriptedTrigger>, config: RiskCalculationConfig) -> Arc<RiskCalculator> {
    let _ = env_logger::builder().is_test(true).try_init();

    let now = Utc.with_ymd_and_hms(2020, 6, 16, 12, 0, 0).unwrap();
    let key_packages = InMemoryKeyPackageStore::new();
    key_packages.add_package(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(), "pkg-1");
    let mut state = PersistentRiskState::default();
    state.record_success(RiskLevel::Low, now - ChronoDuration::hours(1));

    let collaborators = Collaborators {
        authorization: Arc::new(SharedAuthorization::new(ExposureState::active())),
        key_packages: Arc::new(key_packages),
        tracing: Arc::new(InMemoryTracingHistory::new(TracingHistory::active_since(
            now - ChronoDuration::days(3),
        ))),
        store: Arc::new(InMemoryRiskStore::with_state(state)),
        classifier: Arc::new(ThresholdClassifier::default()),
        trigger,
        clock: Arc::new(ManualClock::starting_at(now)),
    };

    Arc::new(RiskCalculator::spawn(config, collaborators))
}

#[tokio::test(start_paused = true)]
async fn test_calculation_started_on_every_tick() {
    let trigger = Arc::new(ScriptedTrigger::always(ScriptedOutcome::Summary(
        ExposureSummary::new(dec!(3)),
    )));
    let calculator = calculator_with(trigger.clone(), RiskCalculationConfig::default());

    let handle = BackgroundScheduler::new(
        SchedulerConfig::every(Duration::from_secs(3600)),
        calculator,
    )
    .unwrap()
    .spawn();

    // Ticks at 0h, 1h and 2h
    tokio::time::sleep(Duration::from_secs(2 * 3600 + 1)).await;
    let stats = handle.shutdown().await;

    assert_eq!(stats.ticks, 3);
    assert_eq!(stats.succeeded, 3);
    assert_eq!(stats.in_flight(), 0);
    assert_eq!(stats.last_level, Some(RiskLevel::Low));
    assert_eq!(trigger.trigger_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_ticking() {
    let trigger = Arc::new(ScriptedTrigger::always(ScriptedOutcome::Summary(
        ExposureSummary::new(dec!(20)),
    )));
    let calculator = calculator_with(trigger.clone(), RiskCalculationConfig::default());

    let handle = BackgroundScheduler::new(SchedulerConfig::every(Duration::from_secs(60)), calculator)
        .unwrap()
        .spawn();

    tokio::time::sleep(Duration::from_secs(1)).await;
    let stats = handle.shutdown().await;
    assert_eq!(stats.ticks, 1);
    assert_eq!(stats.last_level, Some(RiskLevel::High));

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(trigger.trigger_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failures_are_recorded() {
    let trigger = Arc::new(ScriptedTrigger::always(ScriptedOutcome::Failure(
        DetectionFailure::RateLimited,
    )));
    let calculator = calculator_with(trigger, RiskCalculationConfig::default());

    let handle = BackgroundScheduler::new(SchedulerConfig::default(), calculator)
        .unwrap()
        .spawn();

    tokio::time::sleep(Duration::from_secs(1)).await;
    let stats = handle.stats();

    assert_eq!(stats.failed, 1);
    assert_eq!(
        stats.last_error,
        Some(CalculationError::Detection(DetectionFailure::RateLimited))
    );
    assert_eq!(stats.last_level, None);
    assert!(!stats.needs_user_action);
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_runs_queue_in_calculator() {
    let trigger = Arc::new(ScriptedTrigger::always(ScriptedOutcome::Stall));
    let calculator = calculator_with(trigger, RiskCalculationConfig::default());

    let handle = BackgroundScheduler::new(
        SchedulerConfig::every(Duration::from_secs(10)),
        calculator.clone(),
    )
    .unwrap()
    .spawn();

    // Ticks at 0s, 10s, 20s and 30s; the first run is still waiting for detection
    tokio::time::sleep(Duration::from_secs(35)).await;
    let stats = handle.shutdown().await;
    assert_eq!(stats.ticks, 4);
    assert_eq!(stats.in_flight(), 4);

    // Each queued run times out in turn
    tokio::time::sleep(Duration::from_secs(4 * 60 + 1)).await;
    assert_eq!(calculator.listener_registry().armed_total(), 4);
    assert_eq!(calculator.listener_registry().active(), 0);
}

#[tokio::test]
async fn test_closed_calculator_reports_worker_stopped() {
    let trigger = Arc::new(ScriptedTrigger::always(ScriptedOutcome::Stall));
    let calculator = calculator_with(trigger.clone(), RiskCalculationConfig::default());
    calculator.close();

    let handle = BackgroundScheduler::new(SchedulerConfig::default(), calculator)
        .unwrap()
        .spawn();
    tokio::time::sleep(Duration::from_millis(50)).await;
    let stats = handle.shutdown().await;

    assert_eq!(stats.ticks, 1);
    assert_eq!(stats.last_error, Some(CalculationError::WorkerStopped));
    assert_eq!(trigger.trigger_count(), 0);
}

#[tokio::test]
async fn test_zero_interval_rejected() {
    let trigger = Arc::new(ScriptedTrigger::always(ScriptedOutcome::Stall));
    let calculator = calculator_with(trigger, RiskCalculationConfig::default());

    let result = BackgroundScheduler::new(SchedulerConfig { interval_secs: 0 }, calculator);
    assert!(matches!(result, Err(RunnerError::InvalidInterval)));
}
