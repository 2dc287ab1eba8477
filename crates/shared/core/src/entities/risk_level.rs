use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk classification produced by a calculation run
///
/// The derived ordering is the escalation order used by [`RiskLevel::merge`],
/// ascending:
///
/// ```text
/// Low < UnknownOutdated < UnknownInitial < Inactive < High
/// ```
///
/// The three "cannot determine" states sit above `Low` so any of them
/// overrides the `Low` seed of a run, and `Inactive` sits above both unknown
/// states so a permission failure dominates every other policy outcome.
/// `High` is only ever produced after all policy checks passed, so it never
/// competes with the cannot-determine states inside one run.
///
/// Variant order is load-bearing: do not reorder.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    /// Detection ran and found no relevant exposure
    Low,
    /// The last successful detection is older than the staleness threshold
    UnknownOutdated,
    /// Not enough data yet (no keys, no detection, or tracing too short)
    #[default]
    UnknownInitial,
    /// The exposure-notification API is not authorized or not enabled
    Inactive,
    /// Detection found an exposure mapped to high risk
    High,
}

impl RiskLevel {
    /// All variants in ascending escalation order
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::Low,
        RiskLevel::UnknownOutdated,
        RiskLevel::UnknownInitial,
        RiskLevel::Inactive,
        RiskLevel::High,
    ];

    /// Returns `candidate` if it is strictly greater than `self`, else `self`
    pub fn merge(self, candidate: RiskLevel) -> RiskLevel {
        if candidate > self { candidate } else { self }
    }

    /// Fold a sequence of candidates into `seed` with [`RiskLevel::merge`]
    pub fn merge_all(seed: RiskLevel, candidates: impl IntoIterator<Item = RiskLevel>) -> RiskLevel {
        candidates.into_iter().fold(seed, RiskLevel::merge)
    }

    /// Returns true for the "cannot determine" states that end a run early
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RiskLevel::Inactive | RiskLevel::UnknownInitial | RiskLevel::UnknownOutdated
        )
    }

    /// Returns true if a detection run produced this level
    pub fn is_determined(&self) -> bool {
        matches!(self, RiskLevel::Low | RiskLevel::High)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::UnknownOutdated => "unknownOutdated",
            RiskLevel::UnknownInitial => "unknownInitial",
            RiskLevel::Inactive => "inactive",
            RiskLevel::High => "high",
        };
        f.write_str(name)
    }
}
