//! Thread-safe accounting engine.
//!
//! The engine is the single point of truth for all tracker state. It wraps the
//! [`TrackerState`] in one `parking_lot::Mutex`, so every mutation
//! (`record_key_event`, `record_click_event`, `force_inactive_if_silent`)
//! and every snapshot runs entirely under the same lock. Handles are cheap to
//! clone and can be shared between the input ingestion task, the inactivity
//! monitor and the presentation loop.
//!
//! ## Usage
//!
//! ```rust
//! use keytime::libs::config::EngineConfig;
//! use keytime::libs::engine::Engine;
//!
//! let engine = Engine::new(EngineConfig::default(), 0.0)?;
//! engine.record_key_event(0.0, "EDITOR");
//! engine.record_key_event(2.0, "EDITOR");
//! assert_eq!(engine.snapshot(2.0).total_typing_seconds, 2.0);
//! # Ok::<(), keytime::libs::error::TrackerError>(())
//! ```

use super::config::EngineConfig;
use super::error::TrackerError;
use super::input::InputEvent;
use super::metrics::{self, Snapshot};
use super::state::{EventOutcome, TrackerState};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

/// Current wall-clock time as fractional Unix seconds.
pub fn now_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    state: Arc<Mutex<TrackerState>>,
}

impl Engine {
    /// Creates an engine whose session starts at `session_start`.
    ///
    /// # Errors
    ///
    /// Fails with a [`TrackerError`] if the configuration is invalid. No event
    /// can be recorded before this check passes.
    pub fn new(config: EngineConfig, session_start: f64) -> Result<Self, TrackerError> {
        config.validate()?;
        let state = TrackerState::new(session_start, config.inactivity_threshold, config.ledger_capacity);
        Ok(Self {
            config,
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Creates an engine whose session starts now.
    pub fn start_now(config: EngineConfig) -> Result<Self, TrackerError> {
        Self::new(config, now_seconds())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn record_key_event(&self, timestamp: f64, window_label: &str) -> EventOutcome {
        self.state.lock().record_key_event(timestamp, window_label)
    }

    pub fn record_click_event(&self, timestamp: f64, window_label: &str, pressed: bool) -> EventOutcome {
        self.state.lock().record_click_event(timestamp, window_label, pressed)
    }

    /// Applies an input event of either kind.
    pub fn record(&self, event: &InputEvent) -> EventOutcome {
        match event {
            InputEvent::Key { timestamp, window_label } => self.record_key_event(*timestamp, window_label),
            InputEvent::Click {
                timestamp,
                window_label,
                pressed,
            } => self.record_click_event(*timestamp, window_label, *pressed),
        }
    }

    /// Runs the silence check with the configured inactivity threshold.
    pub fn force_inactive_if_silent(&self, now: f64) -> bool {
        self.state.lock().force_inactive_if_silent(now, self.config.inactivity_threshold)
    }

    /// Consistent snapshot of every metric as seen at `now`.
    pub fn snapshot(&self, now: f64) -> Snapshot {
        metrics::snapshot(&self.state.lock(), now)
    }

    /// Runs `f` against the state while holding the lock.
    pub fn read<R>(&self, f: impl FnOnce(&TrackerState) -> R) -> R {
        f(&self.state.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::state::Status;
    use std::thread;

    #[test]
    fn test_rejects_non_positive_threshold() {
        let config = EngineConfig {
            inactivity_threshold: 0.0,
            ..Default::default()
        };
        assert_eq!(Engine::new(config, 0.0).unwrap_err(), TrackerError::InvalidThreshold(0.0));
    }

    #[test]
    fn test_record_dispatches_event_kinds() {
        let engine = Engine::new(EngineConfig::default(), 0.0).unwrap();
        engine.record(&InputEvent::Key {
            timestamp: 1.0,
            window_label: "A".to_string(),
        });
        engine.record(&InputEvent::Click {
            timestamp: 2.0,
            window_label: "A".to_string(),
            pressed: true,
        });

        let snap = engine.snapshot(3.0);
        assert_eq!(snap.keystroke_count, 1);
        assert_eq!(snap.total_clicks, 1);
        assert_eq!(snap.total_typing_seconds, 1.0);
    }

    #[test]
    fn test_clones_share_state() {
        let engine = Engine::new(EngineConfig::default(), 0.0).unwrap();
        let other = engine.clone();
        other.record_key_event(1.0, "A");
        assert_eq!(engine.read(|s| s.status()), Status::Active);
    }

    #[test]
    fn test_concurrent_producers_keep_counts() {
        let engine = Engine::new(EngineConfig::default(), 0.0).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let engine = engine.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        let t = (n * 250 + i) as f64 * 0.01;
                        engine.record_click_event(t, "A", true);
                        engine.force_inactive_if_silent(t);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = engine.snapshot(20.0);
        assert_eq!(snap.total_clicks, 1000);
        let sum = snap.total_active_seconds + snap.total_inactive_seconds;
        assert!((sum - 20.0).abs() < 1e-6);
    }
}
