//! Error types for the activity accounting engine.
//!
//! Only construction-time configuration problems are surfaced to the caller.
//! Collaborator failures (window lookup, input hooks) are represented here so
//! they can be logged, but the runtime absorbs them and falls back to neutral
//! behavior instead of propagating them into the accounting loop.

use thiserror::Error;

/// Failures produced by the engine and its collaborators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    /// The inactivity threshold must be a positive, finite number of seconds.
    #[error("inactivity threshold must be positive, got {0} seconds")]
    InvalidThreshold(f64),

    /// The inactivity poll interval must be a positive, finite number of seconds.
    #[error("poll interval must be positive, got {0} seconds")]
    InvalidPollInterval(f64),

    /// The window ledger must be able to hold at least one label.
    #[error("ledger capacity must be at least 1")]
    InvalidLedgerCapacity,

    /// The dashboard refresh interval must be a positive, finite number of seconds.
    #[error("refresh interval must be positive, got {0} seconds")]
    InvalidRefreshInterval(f64),

    /// No live input capability could be started.
    #[error("input source unavailable: {0}")]
    InputSourceUnavailable(String),

    /// The foreground application could not be determined.
    #[error("window resolution unavailable: {0}")]
    WindowResolutionUnavailable(String),
}
