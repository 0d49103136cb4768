//! Activity state machine and time accounting.
//!
//! `TrackerState` owns the Active/Inactive status together with every running
//! total derived from input events. It is a plain single-threaded value: all
//! methods take `&mut self` and the [`Engine`](crate::libs::engine::Engine)
//! serializes access to it.
//!
//! ## Accounting Rules
//!
//! - Any accepted event (key press or pressed click) flips `Inactive` to
//!   `Active`, closing the inactive interval up to the event.
//! - While `Active`, the gap since the previous event is added to typing time
//!   and to the ledger entry of the current window, but only if the gap is
//!   strictly below the inactivity threshold.
//! - `Active` flips back to `Inactive` only through
//!   [`TrackerState::force_inactive_if_silent`], which closes the active
//!   interval up to the observation instant.
//!
//! Typing time and active time are two independent metrics. Typing time only
//! counts short gaps between events, active time counts the whole span between
//! status changes, and the two are expected to differ.

use super::histogram::{ActivityHistogram, HistogramSnapshot};
use super::ledger::WindowTimeLedger;
use serde::Serialize;
use std::fmt;

/// Label used when the foreground application is not known.
pub const UNKNOWN_WINDOW: &str = "UNKNOWN";

/// Coarse engagement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Active,
    Inactive,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "ACTIVE"),
            Status::Inactive => write!(f, "INACTIVE"),
        }
    }
}

/// What an accepted event changed, for callers that want to report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The event flipped the status from `Inactive` to `Active`.
    pub activated: bool,
    /// Accrued time was dropped because the ledger is full.
    pub ledger_dropped: bool,
}

#[derive(Debug, Clone)]
pub struct TrackerState {
    status: Status,
    inactivity_threshold: f64,
    session_start: f64,
    last_event_timestamp: Option<f64>,
    last_status_change_timestamp: f64,
    total_typing_seconds: f64,
    total_active_seconds: f64,
    total_inactive_seconds: f64,
    total_clicks: u64,
    keystroke_count: u64,
    current_window_label: String,
    ledger: WindowTimeLedger,
    histogram: ActivityHistogram,
}

impl TrackerState {
    /// Creates an `Inactive` state whose session starts at `session_start`.
    pub fn new(session_start: f64, inactivity_threshold: f64, ledger_capacity: usize) -> Self {
        Self {
            status: Status::Inactive,
            inactivity_threshold,
            session_start,
            last_event_timestamp: None,
            last_status_change_timestamp: session_start,
            total_typing_seconds: 0.0,
            total_active_seconds: 0.0,
            total_inactive_seconds: 0.0,
            total_clicks: 0,
            keystroke_count: 0,
            current_window_label: UNKNOWN_WINDOW.to_string(),
            ledger: WindowTimeLedger::new(ledger_capacity),
            histogram: ActivityHistogram::new(),
        }
    }

    /// Records a key press observed at `timestamp` in `window_label`.
    pub fn record_key_event(&mut self, timestamp: f64, window_label: &str) -> EventOutcome {
        self.keystroke_count += 1;
        self.histogram.increment(timestamp);
        self.accept_event(timestamp, window_label)
    }

    /// Records a mouse button event.
    ///
    /// Releases only refresh the current window label. Presses count as a click
    /// and drive the same transition and accrual logic as key presses, without
    /// contributing to the keypress histogram.
    pub fn record_click_event(&mut self, timestamp: f64, window_label: &str, pressed: bool) -> EventOutcome {
        if !pressed {
            self.set_window_label(window_label);
            return EventOutcome::default();
        }
        self.total_clicks += 1;
        self.accept_event(timestamp, window_label)
    }

    /// Flips `Active` to `Inactive` once `now` is at least `threshold` seconds
    /// past the last event.
    ///
    /// The closed active interval runs up to `now`, the observation instant.
    /// Returns `true` when a transition happened.
    pub fn force_inactive_if_silent(&mut self, now: f64, threshold: f64) -> bool {
        if self.status != Status::Active {
            return false;
        }
        let Some(last_event) = self.last_event_timestamp else {
            return false;
        };
        if now - last_event < threshold {
            return false;
        }

        let change_at = now.max(self.last_status_change_timestamp);
        self.total_active_seconds += change_at - self.last_status_change_timestamp;
        self.last_status_change_timestamp = change_at;
        self.status = Status::Inactive;
        true
    }

    fn accept_event(&mut self, timestamp: f64, window_label: &str) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        self.set_window_label(window_label);

        match self.status {
            Status::Inactive => {
                // Events older than the last change are pinned to it so the
                // closed interval can never be negative
                let change_at = timestamp.max(self.last_status_change_timestamp);
                self.total_inactive_seconds += change_at - self.last_status_change_timestamp;
                self.last_status_change_timestamp = change_at;
                self.status = Status::Active;
                outcome.activated = true;
            }
            Status::Active => {
                let delta = self
                    .last_event_timestamp
                    .map(|last| (timestamp - last).max(0.0))
                    .unwrap_or(0.0);
                if delta < self.inactivity_threshold {
                    self.total_typing_seconds += delta;
                    outcome.ledger_dropped = !self.ledger.add(window_label, delta);
                }
            }
        }

        self.last_event_timestamp = Some(timestamp);
        outcome
    }

    fn set_window_label(&mut self, window_label: &str) {
        if self.current_window_label != window_label {
            self.current_window_label = window_label.to_string();
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn inactivity_threshold(&self) -> f64 {
        self.inactivity_threshold
    }

    pub fn session_start(&self) -> f64 {
        self.session_start
    }

    pub fn last_event_timestamp(&self) -> Option<f64> {
        self.last_event_timestamp
    }

    pub fn last_status_change_timestamp(&self) -> f64 {
        self.last_status_change_timestamp
    }

    pub fn total_typing_seconds(&self) -> f64 {
        self.total_typing_seconds
    }

    /// Closed-out active seconds, excluding the ongoing interval.
    pub fn total_active_seconds(&self) -> f64 {
        self.total_active_seconds
    }

    /// Closed-out inactive seconds, excluding the ongoing interval.
    pub fn total_inactive_seconds(&self) -> f64 {
        self.total_inactive_seconds
    }

    /// Time spent in the current status as seen at `now`.
    pub fn ongoing_seconds(&self, now: f64) -> f64 {
        (now - self.last_status_change_timestamp).max(0.0)
    }

    /// Active and inactive totals at `now`, with the ongoing interval
    /// attributed to the current status.
    pub fn status_totals(&self, now: f64) -> (f64, f64) {
        let ongoing = self.ongoing_seconds(now);
        match self.status {
            Status::Active => (self.total_active_seconds + ongoing, self.total_inactive_seconds),
            Status::Inactive => (self.total_active_seconds, self.total_inactive_seconds + ongoing),
        }
    }

    pub fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    pub fn keystroke_count(&self) -> u64 {
        self.keystroke_count
    }

    pub fn current_window_label(&self) -> &str {
        &self.current_window_label
    }

    pub fn ledger(&self) -> &WindowTimeLedger {
        &self.ledger
    }

    pub fn histogram(&self) -> HistogramSnapshot {
        self.histogram.snapshot()
    }
}
