//! Time formatting utilities for user-friendly display.
//!
//! ## Format Specifications
//!
//! Durations follow the "HH:MM:SS" pattern:
//! - Hours, minutes and seconds are zero-padded to 2 digits (hours may grow wider)
//! - Fractions of a second are truncated, never rounded up
//! - Negative and non-finite durations are treated as "00:00:00"
//!
//! ### Examples
//! - 90 seconds → "00:01:30"
//! - 3725.9 seconds → "01:02:05"
//! - 100 hours → "100:00:00"
//!
//! ```rust
//! use keytime::libs::formatter::{format_duration, parse_duration};
//!
//! assert_eq!(format_duration(3725.9), "01:02:05");
//! assert_eq!(parse_duration("01:02:05"), Some(3725));
//! ```

use chrono::{DateTime, Local};
use std::time::Duration;

/// Formats a number of seconds as "HH:MM:SS".
///
/// Hours, minutes and seconds come from successive floor divisions of the
/// truncated total, so the result never shows more time than elapsed.
///
/// ```rust
/// use keytime::libs::formatter::format_duration;
///
/// assert_eq!(format_duration(0.0), "00:00:00");
/// assert_eq!(format_duration(59.99), "00:00:59");
/// assert_eq!(format_duration(-5.0), "00:00:00");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parses an "HH:MM:SS" string back into whole seconds.
///
/// Minutes and seconds must be below 60. Returns `None` for anything that
/// [`format_duration`] would not have produced.
pub fn parse_duration(value: &str) -> Option<u64> {
    let mut parts = value.trim().split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || seconds >= 60 {
        return None;
    }
    hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
}

/// Converts a number of seconds into a non-zero [`Duration`].
///
/// Returns `None` for zero, negative, non-finite and out-of-range values, and
/// for values too small to survive nanosecond rounding.
pub fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok().filter(|d| !d.is_zero())
}

/// Formats a Unix timestamp (seconds) as local wall-clock "HH:MM:SS".
pub fn format_clock_time(timestamp: f64) -> String {
    DateTime::from_timestamp_micros((timestamp * 1_000_000.0) as i64)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

/// Formats a rate with one decimal place, the way the dashboard shows it.
pub fn format_rate(value: f64) -> String {
    format!("{:.1}", value)
}
