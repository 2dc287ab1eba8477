//! Exposure Detection
//!
//! Typed signalling between a risk calculation run and the platform
//! exposure-detection API. Provides:
//! - The [`DetectionTrigger`] port (fire-and-forget detection request)
//! - One-shot [`DetectionSink`]/[`SummaryListener`] pairs carrying a typed
//!   [`DetectionSignal`] instead of untyped notification payloads
//! - A [`ListenerRegistry`] that makes listener leaks observable
//! - Adapters: tokio channel bridge and a scripted trigger
//!
//! ## Flow
//!
//! ```text
//!  Calculation run                         Platform
//!  ───────────────                         ────────
//!  registry.arm(run_id)
//!     │ sink ─────► trigger.detect_exposures(sink) ───► detection run
//!     │                                                     │
//!  listener.wait(timeout) ◄──── SummaryAvailable | Failed ──┘
//!     │
//!  subscription released (always)
//! ```

pub mod adapters;
pub mod channel;
pub mod error;
pub mod listener;
pub mod signal;
pub mod trigger;

// Re-export commonly used types
pub use adapters::{ScriptedOutcome, ScriptedTrigger};
pub use channel::{ChannelDetectionTrigger, DetectionResponder};
pub use error::{ListenError, TriggerError};
pub use listener::{DetectionSink, ListenerRegistry, SummaryListener};
pub use signal::DetectionSignal;
pub use trigger::DetectionTrigger;
