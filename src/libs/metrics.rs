//! Read-only metrics derived from the tracker state.
//!
//! Every function here is pure: it takes a [`TrackerState`] and a query
//! instant and never mutates anything. The [`Snapshot`] bundles all of them
//! into one consistent view for the presentation layer.
//!
//! ## Formulas
//!
//! ```text
//! elapsed     = now - session_start
//! efficiency  = 100 * typing_seconds / max(elapsed, EPSILON)   (0 when elapsed is 0)
//! keys/min    = keystroke_count / (elapsed / 60)              (0 when elapsed is 0)
//! clicks/min  = total_clicks / (elapsed / 60)                 (0 when elapsed is 0)
//! ```
//!
//! Efficiency is not algebraically bounded by 100 if the accrual rules ever
//! change, so [`efficiency_display`] clamps it for presentation.

use super::histogram::HistogramSnapshot;
use super::state::{Status, TrackerState};
use serde::Serialize;

/// Smallest elapsed time used as a divisor.
pub const EPSILON: f64 = 1e-9;

/// Maximum number of programs carried in a snapshot.
pub const SNAPSHOT_TOP_WINDOWS: usize = 20;

/// Seconds since the session started, never negative.
pub fn elapsed_seconds(state: &TrackerState, now: f64) -> f64 {
    (now - state.session_start()).max(0.0)
}

/// Continuous typing time as a percentage of the session length.
pub fn efficiency_percent(state: &TrackerState, now: f64) -> f64 {
    let elapsed = elapsed_seconds(state, now);
    if elapsed <= 0.0 {
        return 0.0;
    }
    100.0 * state.total_typing_seconds() / elapsed.max(EPSILON)
}

/// Efficiency clamped to `[0, 100]`.
pub fn efficiency_display(state: &TrackerState, now: f64) -> f64 {
    efficiency_percent(state, now).clamp(0.0, 100.0)
}

pub fn keys_per_minute(state: &TrackerState, now: f64) -> f64 {
    per_minute(state.keystroke_count(), elapsed_seconds(state, now))
}

pub fn clicks_per_minute(state: &TrackerState, now: f64) -> f64 {
    per_minute(state.total_clicks(), elapsed_seconds(state, now))
}

fn per_minute(count: u64, elapsed: f64) -> f64 {
    if elapsed <= 0.0 {
        return 0.0;
    }
    count as f64 / (elapsed / 60.0)
}

/// Consistent, immutable view of the engine at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub session_start: f64,
    pub elapsed_seconds: f64,
    pub total_typing_seconds: f64,
    /// Active time including the ongoing interval when currently active.
    pub total_active_seconds: f64,
    /// Inactive time including the ongoing interval when currently inactive.
    pub total_inactive_seconds: f64,
    pub total_clicks: u64,
    pub keystroke_count: u64,
    pub efficiency_percent: f64,
    pub keys_per_minute: f64,
    pub clicks_per_minute: f64,
    pub current_window_label: String,
    pub most_active_window: Option<String>,
    pub top_windows: Vec<(String, f64)>,
    pub histogram: HistogramSnapshot,
}

/// Builds a [`Snapshot`] of `state` as seen at `now`.
pub fn snapshot(state: &TrackerState, now: f64) -> Snapshot {
    let (active, inactive) = state.status_totals(now);
    let top_windows = state.ledger().top_n(SNAPSHOT_TOP_WINDOWS);

    Snapshot {
        status: state.status(),
        session_start: state.session_start(),
        elapsed_seconds: elapsed_seconds(state, now),
        total_typing_seconds: state.total_typing_seconds(),
        total_active_seconds: active,
        total_inactive_seconds: inactive,
        total_clicks: state.total_clicks(),
        keystroke_count: state.keystroke_count(),
        efficiency_percent: efficiency_percent(state, now),
        keys_per_minute: keys_per_minute(state, now),
        clicks_per_minute: clicks_per_minute(state, now),
        current_window_label: state.current_window_label().to_string(),
        most_active_window: top_windows.first().map(|(label, _)| label.clone()),
        top_windows,
        histogram: state.histogram(),
    }
}
