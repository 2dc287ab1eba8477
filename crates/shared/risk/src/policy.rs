//! Freshness and duration policy
//!
//! Each check is a pure predicate that either yields a candidate risk level
//! or nothing. [`RiskPolicy::evaluate`] runs them in the fixed order and
//! merges every candidate into the `Low` seed.

use chrono::Duration;
use exposure_core::{ExposureState, KeyPackageInventory, RiskLevel, Timestamp, TracingHistory};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How "tracing has been active long enough" is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TracingDurationMode {
    /// Wall-clock time since tracing was first enabled
    SinceFirstEnabled,
    /// Sum of all periods tracing was actually enabled
    #[default]
    Cumulative,
}

/// Returns `Inactive` if the platform API is not authorized and enabled
pub fn check_permissions(state: &ExposureState) -> Option<RiskLevel> {
    (!state.is_good()).then_some(RiskLevel::Inactive)
}

/// Returns `UnknownInitial` if no key packages were downloaded yet
pub fn check_downloaded_keys(inventory: &KeyPackageInventory) -> Option<RiskLevel> {
    inventory.is_empty().then_some(RiskLevel::UnknownInitial)
}

/// Returns `UnknownInitial` if tracing was active for less than `minimum`
pub fn check_tracing_duration(
    history: &TracingHistory,
    now: Timestamp,
    minimum: Duration,
    mode: TracingDurationMode,
) -> Option<RiskLevel> {
    let active = match mode {
        TracingDurationMode::SinceFirstEnabled => history.duration_since_first_enabled(now),
        TracingDurationMode::Cumulative => history.active_duration(now),
    };

    if history.first_enabled_at().is_none() || active < minimum {
        Some(RiskLevel::UnknownInitial)
    } else {
        None
    }
}

/// Returns `UnknownInitial` without a prior detection, `UnknownOutdated` once
/// the last detection is at least `threshold` old
///
/// The boundary is inclusive: exactly `threshold` old is outdated. A
/// detection timestamp in the future counts as fresh.
pub fn check_staleness(
    last_detection: Option<Timestamp>,
    now: Timestamp,
    threshold: Duration,
) -> Option<RiskLevel> {
    match last_detection {
        None => Some(RiskLevel::UnknownInitial),
        Some(last) if now - last >= threshold => Some(RiskLevel::UnknownOutdated),
        Some(_) => None,
    }
}

/// Identifies one policy check, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyCheck {
    Permissions,
    DownloadedKeys,
    TracingDuration,
    Staleness,
}

impl PolicyCheck {
    /// Fixed evaluation order
    pub const ORDER: [PolicyCheck; 4] = [
        PolicyCheck::Permissions,
        PolicyCheck::DownloadedKeys,
        PolicyCheck::TracingDuration,
        PolicyCheck::Staleness,
    ];
}

impl fmt::Display for PolicyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyCheck::Permissions => "permissions",
            PolicyCheck::DownloadedKeys => "downloaded-keys",
            PolicyCheck::TracingDuration => "tracing-duration",
            PolicyCheck::Staleness => "staleness",
        };
        f.write_str(name)
    }
}

/// Snapshot of every policy input, taken once at the start of a run
#[derive(Debug, Clone)]
pub struct PolicyInputs {
    pub exposure_state: ExposureState,
    pub inventory: KeyPackageInventory,
    pub tracing_history: TracingHistory,
    pub last_detection: Option<Timestamp>,
    pub now: Timestamp,
}

/// Result of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub check: PolicyCheck,
    pub candidate: Option<RiskLevel>,
}

/// Result of a full policy pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEvaluation {
    /// One outcome per check, in evaluation order
    pub outcomes: Vec<PolicyOutcome>,
    /// Seed merged with every candidate
    pub level: RiskLevel,
}

impl PolicyEvaluation {
    /// True if the merged level ends the run without a detection
    pub fn is_early_exit(&self) -> bool {
        self.level.is_terminal()
    }

    /// Checks that produced a candidate
    pub fn failed_checks(&self) -> impl Iterator<Item = &PolicyOutcome> {
        self.outcomes.iter().filter(|o| o.candidate.is_some())
    }
}

/// Thresholds for the freshness and duration checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskPolicy {
    /// Minimum tracing time before a determined level is meaningful
    pub minimum_tracing_duration: Duration,
    /// Maximum age of the last detection before results are outdated
    pub staleness_threshold: Duration,
    pub tracing_duration_mode: TracingDurationMode,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            minimum_tracing_duration: Duration::hours(24),
            staleness_threshold: Duration::hours(24),
            tracing_duration_mode: TracingDurationMode::default(),
        }
    }
}

impl RiskPolicy {
    /// Baseline level every run starts from
    pub const SEED: RiskLevel = RiskLevel::Low;

    /// Run all checks in order and merge their candidates
    ///
    /// No check short-circuits: the caller decides on early exit only after
    /// the full pass.
    pub fn evaluate(&self, inputs: &PolicyInputs) -> PolicyEvaluation {
        let mut level = Self::SEED;
        let mut outcomes = Vec::with_capacity(PolicyCheck::ORDER.len());

        for check in PolicyCheck::ORDER {
            let candidate = self.run_check(check, inputs);
            if let Some(candidate) = candidate {
                debug!("[POLICY] {} check yielded {}", check, candidate);
                level = level.merge(candidate);
            }
            outcomes.push(PolicyOutcome { check, candidate });
        }

        PolicyEvaluation { outcomes, level }
    }

    fn run_check(&self, check: PolicyCheck, inputs: &PolicyInputs) -> Option<RiskLevel> {
        match check {
            PolicyCheck::Permissions => check_permissions(&inputs.exposure_state),
            PolicyCheck::DownloadedKeys => check_downloaded_keys(&inputs.inventory),
            PolicyCheck::TracingDuration => check_tracing_duration(
                &inputs.tracing_history,
                inputs.now,
                self.minimum_tracing_duration,
                self.tracing_duration_mode,
            ),
            PolicyCheck::Staleness => {
                check_staleness(inputs.last_detection, inputs.now, self.staleness_threshold)
            }
        }
    }
}
