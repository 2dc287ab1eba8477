use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::values::Timestamp;

/// One continuous stretch of active tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingPeriod {
    pub enabled_at: Timestamp,
    /// None while the period is still open
    pub disabled_at: Option<Timestamp>,
}

impl TracingPeriod {
    pub fn open(enabled_at: Timestamp) -> Self {
        Self {
            enabled_at,
            disabled_at: None,
        }
    }

    pub fn closed(enabled_at: Timestamp, disabled_at: Timestamp) -> Self {
        Self {
            enabled_at,
            disabled_at: Some(disabled_at),
        }
    }

    pub fn is_open(&self) -> bool {
        self.disabled_at.is_none()
    }

    /// Period bounds clipped to `now`; None if nothing of it lies before `now`
    fn clipped(&self, now: Timestamp) -> Option<(Timestamp, Timestamp)> {
        let end = self.disabled_at.map_or(now, |d| d.min(now));
        (self.enabled_at < end).then_some((self.enabled_at, end))
    }
}

/// History of tracing enable/disable transitions
///
/// Recorded by the surrounding application; the risk calculation only reads
/// it to decide whether tracing has been running long enough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingHistory {
    periods: Vec<TracingPeriod>,
}

impl TracingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_periods(periods: impl IntoIterator<Item = TracingPeriod>) -> Self {
        let mut periods: Vec<_> = periods.into_iter().collect();
        periods.sort_by_key(|p| p.enabled_at);
        Self { periods }
    }

    /// Tracing has been active since `since`, with no interruption
    pub fn active_since(since: Timestamp) -> Self {
        Self::from_periods([TracingPeriod::open(since)])
    }

    pub fn periods(&self) -> &[TracingPeriod] {
        &self.periods
    }

    pub fn is_active(&self) -> bool {
        self.periods.last().is_some_and(TracingPeriod::is_open)
    }

    /// When tracing was first switched on
    pub fn first_enabled_at(&self) -> Option<Timestamp> {
        self.periods.iter().map(|p| p.enabled_at).min()
    }

    /// Record that tracing was switched on (no-op if already on)
    pub fn record_enabled(&mut self, at: Timestamp) {
        if !self.is_active() {
            self.periods.push(TracingPeriod::open(at));
        }
    }

    /// Record that tracing was switched off (no-op if already off)
    pub fn record_disabled(&mut self, at: Timestamp) {
        if let Some(period) = self.periods.last_mut()
            && period.is_open()
        {
            period.disabled_at = Some(at.max(period.enabled_at));
        }
    }

    /// Wall-clock time since tracing was first switched on
    pub fn duration_since_first_enabled(&self, now: Timestamp) -> Duration {
        self.first_enabled_at()
            .map(|first| (now - first).max(Duration::zero()))
            .unwrap_or_else(Duration::zero)
    }

    /// Total time tracing was active up to `now`
    ///
    /// Overlapping periods are counted once; open periods end at `now`.
    pub fn active_duration(&self, now: Timestamp) -> Duration {
        let mut spans: Vec<_> = self.periods.iter().filter_map(|p| p.clipped(now)).collect();
        spans.sort_by_key(|(start, _)| *start);

        let mut total = Duration::zero();
        let mut current: Option<(Timestamp, Timestamp)> = None;

        for (start, end) in spans {
            current = match current {
                Some((cur_start, cur_end)) if start <= cur_end => Some((cur_start, cur_end.max(end))),
                Some((cur_start, cur_end)) => {
                    total += cur_end - cur_start;
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }

        if let Some((start, end)) = current {
            total += end - start;
        }

        total
    }
}
