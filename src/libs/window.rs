//! Foreground program resolution.
//!
//! A [`WindowResolver`] returns a best-effort label for the program the user
//! is working in. Resolution never fails from the caller's point of view: when
//! the program cannot be determined the label is [`UNKNOWN_WINDOW`].
//!
//! Lookups can be expensive, so the tracker wraps its resolver in a
//! [`CachedWindowResolver`] that refreshes at most once per interval.

use super::error::TrackerError;
use super::messages::Message;
use super::state::UNKNOWN_WINDOW;
use crate::msg_debug;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Default minimum time between two real lookups.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Process names that are never reported as the foreground program.
const IGNORED_PROCESSES: [&str; 4] = ["System", "systemd", "launchd", "kernel"];

pub trait WindowResolver: Send {
    /// Label of the current foreground program, or `"UNKNOWN"`.
    fn resolve(&mut self) -> String;
}

/// Approximates the foreground program with the busiest user process.
///
/// Without a portable foreground-window API, the process using the most CPU
/// (excluding system processes and keytime itself) is a usable stand-in.
/// Labels are uppercased.
pub struct ProcessWindowResolver {
    system: System,
    own_pid: Pid,
}

impl ProcessWindowResolver {
    /// Takes a first process sample so later lookups have CPU usage to compare.
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);
        Self {
            system,
            own_pid: Pid::from_u32(std::process::id()),
        }
    }

    fn try_resolve(&mut self) -> Result<String, TrackerError> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        self.system
            .processes()
            .iter()
            .filter(|(pid, _)| **pid != self.own_pid)
            .map(|(_, process)| (process.name().to_string_lossy().to_string(), process.cpu_usage()))
            .filter(|(name, _)| !name.is_empty() && !IGNORED_PROCESSES.contains(&name.as_str()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name.to_uppercase())
            .ok_or_else(|| TrackerError::WindowResolutionUnavailable("no candidate process".to_string()))
    }
}

impl Default for ProcessWindowResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowResolver for ProcessWindowResolver {
    fn resolve(&mut self) -> String {
        match self.try_resolve() {
            Ok(label) => label,
            Err(e) => {
                msg_debug!(Message::WindowResolutionFailed(e.to_string()));
                UNKNOWN_WINDOW.to_string()
            }
        }
    }
}

/// Always returns the same label.
#[derive(Debug, Clone)]
pub struct StaticWindowResolver {
    label: String,
}

impl StaticWindowResolver {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    /// Resolver for environments where no lookup is possible.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_WINDOW)
    }
}

impl WindowResolver for StaticWindowResolver {
    fn resolve(&mut self) -> String {
        self.label.clone()
    }
}

/// Rate-limits another resolver, serving the cached label between refreshes.
pub struct CachedWindowResolver<R> {
    inner: R,
    interval: Duration,
    cached: Option<(Instant, String)>,
}

impl<R: WindowResolver> CachedWindowResolver<R> {
    pub fn new(inner: R, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            cached: None,
        }
    }

    /// Resolves as seen at `now`, refreshing only if the cache is stale.
    pub fn resolve_at(&mut self, now: Instant) -> String {
        if let Some((at, label)) = &self.cached {
            if now.saturating_duration_since(*at) < self.interval {
                return label.clone();
            }
        }
        let label = self.inner.resolve();
        self.cached = Some((now, label.clone()));
        label
    }
}

impl<R: WindowResolver> WindowResolver for CachedWindowResolver<R> {
    fn resolve(&mut self) -> String {
        self.resolve_at(Instant::now())
    }
}
