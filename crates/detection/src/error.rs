//! Error types for the detection crate

use std::time::Duration;
use thiserror::Error;

/// Errors raised when handing a detection request to the platform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriggerError {
    #[error("Detection channel closed")]
    ChannelClosed,

    #[error("Detection request rejected: {0}")]
    Rejected(String),
}

/// Ways a summary listener can resolve without a signal
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenError {
    #[error("No detection signal within {0:?}")]
    TimedOut(Duration),

    #[error("Detection sink dropped without signalling")]
    SignalDropped,
}
