//! Configuration loading for the risk calculator
//!
//! Supports JSON configuration files; every field is optional and falls
//! back to the defaults below.

use chrono::TimeDelta;
use exposure_risk::{RiskPolicy, ThresholdClassifier, TracingDurationMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration for the risk calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskCalculationConfig {
    /// Minimum hours of tracing before a determined level is reported
    pub minimum_tracing_hours: i64,
    /// Hours after which the last detection is outdated (inclusive)
    pub staleness_threshold_hours: i64,
    /// Upper bound on waiting for a detection signal
    pub detection_timeout_secs: u64,
    /// How tracing time is measured
    pub tracing_duration_mode: TracingDurationMode,
    /// Maximum risk score at or above which the level is `High`
    pub high_risk_threshold: Decimal,
}

impl Default for RiskCalculationConfig {
    fn default() -> Self {
        Self {
            minimum_tracing_hours: 24,
            staleness_threshold_hours: 24,
            detection_timeout_secs: 60,
            tracing_duration_mode: TracingDurationMode::default(),
            high_risk_threshold: ThresholdClassifier::DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl RiskCalculationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_tracing_hours < 0 {
            return Err(ConfigError::Invalid(format!(
                "minimum_tracing_hours must not be negative, got {}",
                self.minimum_tracing_hours
            )));
        }
        if TimeDelta::try_hours(self.minimum_tracing_hours).is_none() {
            return Err(ConfigError::Invalid(format!(
                "minimum_tracing_hours is out of range, got {}",
                self.minimum_tracing_hours
            )));
        }
        if self.staleness_threshold_hours <= 0 {
            return Err(ConfigError::Invalid(format!(
                "staleness_threshold_hours must be positive, got {}",
                self.staleness_threshold_hours
            )));
        }
        if TimeDelta::try_hours(self.staleness_threshold_hours).is_none() {
            return Err(ConfigError::Invalid(format!(
                "staleness_threshold_hours is out of range, got {}",
                self.staleness_threshold_hours
            )));
        }
        if self.detection_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "detection_timeout_secs must be positive".to_string(),
            ));
        }
        if self.high_risk_threshold.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "high_risk_threshold must not be negative, got {}",
                self.high_risk_threshold
            )));
        }
        Ok(())
    }

    /// Policy thresholds; hours beyond the representable range saturate
    pub fn policy(&self) -> RiskPolicy {
        RiskPolicy {
            minimum_tracing_duration: saturating_hours(self.minimum_tracing_hours),
            staleness_threshold: saturating_hours(self.staleness_threshold_hours),
            tracing_duration_mode: self.tracing_duration_mode,
        }
    }

    pub fn classifier(&self) -> ThresholdClassifier {
        ThresholdClassifier::new(self.high_risk_threshold)
    }

    pub fn detection_timeout(&self) -> Duration {
        Duration::from_secs(self.detection_timeout_secs)
    }
}

fn saturating_hours(hours: i64) -> TimeDelta {
    let bound = if hours < 0 { TimeDelta::MIN } else { TimeDelta::MAX };
    TimeDelta::try_hours(hours).unwrap_or(bound)
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
