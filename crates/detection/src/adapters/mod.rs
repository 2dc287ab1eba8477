//! Detection trigger adapters

pub mod scripted;

pub use scripted::{ScriptedOutcome, ScriptedTrigger};
