use thiserror::Error;

/// Errors raised by persistent store adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store I/O failed at {path}: {error}")]
    Io { path: String, error: String },

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
