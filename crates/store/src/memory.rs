use dashmap::DashMap;
use exposure_core::{DayId, PersistentRiskState, Timestamp, TracingHistory};
use exposure_ports::{KeyPackageStore, RiskStore, StoreError, StoreResult, TracingHistorySource};
use std::collections::{BTreeSet, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Risk state kept in memory
///
/// Counts writes and can be told to fail them, so callers can verify which
/// paths persist.
#[derive(Default)]
pub struct InMemoryRiskStore {
    state: RwLock<PersistentRiskState>,
    saves: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryRiskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistentRiskState) -> Self {
        Self {
            state: RwLock::new(state),
            ..Default::default()
        }
    }

    /// Current state without going through the port
    pub fn snapshot(&self) -> PersistentRiskState {
        *self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    /// Successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make subsequent `save` calls fail with `StoreError::Unavailable`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl RiskStore for InMemoryRiskStore {
    fn load(&self) -> StoreResult<PersistentRiskState> {
        self.state
            .read()
            .map(|state| *state)
            .map_err(|_| StoreError::Unavailable("risk state lock poisoned".to_string()))
    }

    fn save(&self, state: &PersistentRiskState) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }

        let mut current = self
            .state
            .write()
            .map_err(|_| StoreError::Unavailable("risk state lock poisoned".to_string()))?;
        *current = *state;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Downloaded key packages grouped by day
#[derive(Default)]
pub struct InMemoryKeyPackageStore {
    packages: DashMap<DayId, HashSet<String>>,
}

impl InMemoryKeyPackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a downloaded package; returns false if it was already known
    pub fn add_package(&self, day: DayId, package_id: impl Into<String>) -> bool {
        self.packages.entry(day).or_default().insert(package_id.into())
    }

    /// Forget every package for `day` (retention cleanup)
    pub fn remove_day(&self, day: DayId) {
        self.packages.remove(&day);
    }

    /// Drop days older than `oldest_kept`
    pub fn retain_since(&self, oldest_kept: DayId) {
        self.packages.retain(|day, _| *day >= oldest_kept);
    }

    pub fn package_count(&self) -> usize {
        self.packages.iter().map(|entry| entry.value().len()).sum()
    }
}

impl KeyPackageStore for InMemoryKeyPackageStore {
    fn all_days(&self) -> BTreeSet<DayId> {
        self.packages
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| *entry.key())
            .collect()
    }
}

/// Tracing history recorded by the application
#[derive(Default)]
pub struct InMemoryTracingHistory {
    history: RwLock<TracingHistory>,
}

impl InMemoryTracingHistory {
    pub fn new(history: TracingHistory) -> Self {
        Self {
            history: RwLock::new(history),
        }
    }

    pub fn record_enabled(&self, at: Timestamp) {
        self.history
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .record_enabled(at);
    }

    pub fn record_disabled(&self, at: Timestamp) {
        self.history
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .record_disabled(at);
    }
}

impl TracingHistorySource for InMemoryTracingHistory {
    fn tracing_history(&self) -> TracingHistory {
        self.history.read().unwrap_or_else(|p| p.into_inner()).clone()
    }
}
