use exposure_calculator::ConfigError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Scheduler interval must be positive")]
    InvalidInterval,
}
