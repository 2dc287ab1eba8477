//! Runner configuration
//!
//! One JSON document configures both the calculator and the refresh
//! schedule:
//!
//! ```json
//! {
//!   "calculator": { "detection_timeout_secs": 30 },
//!   "scheduler": { "interval_secs": 3600 }
//! }
//! ```

use crate::error::RunnerError;
use exposure_calculator::{ConfigError, RiskCalculationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How often the background refresh starts a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between two calculation starts; the first starts immediately
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 4 * 60 * 60,
        }
    }
}

impl SchedulerConfig {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval_secs: interval.as_secs(),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.interval_secs == 0 {
            return Err(RunnerError::InvalidInterval);
        }
        Ok(())
    }
}

/// Complete runner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub calculator: RiskCalculationConfig,
    pub scheduler: SchedulerConfig,
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, RunnerError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.calculator.validate()?;
        config.scheduler.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::from_json("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.scheduler.interval(), Duration::from_secs(14_400));
    }

    #[test]
    fn test_nested_sections() {
        let json = r#"{
            "calculator": { "detection_timeout_secs": 30 },
            "scheduler": { "interval_secs": 900 }
        }"#;

        let config = RunnerConfig::from_json(json).unwrap();
        assert_eq!(config.calculator.detection_timeout_secs, 30);
        assert_eq!(config.calculator.minimum_tracing_hours, 24);
        assert_eq!(config.scheduler, SchedulerConfig::every(Duration::from_secs(900)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = RunnerConfig::from_json(r#"{ "scheduler": { "interval_secs": 0 } }"#);
        assert!(matches!(result, Err(RunnerError::InvalidInterval)));
    }

    #[test]
    fn test_invalid_calculator_section() {
        let result = RunnerConfig::from_json(r#"{ "calculator": { "detection_timeout_secs": 0 } }"#);
        assert!(matches!(
            result,
            Err(RunnerError::Config(ConfigError::Invalid(_)))
        ));
    }
}
