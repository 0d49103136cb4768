//! Inactivity monitor.
//!
//! A periodic task that flips the engine to `Inactive` once no input has been
//! seen for the inactivity threshold. This is the only way the status ever
//! leaves `Active`; the closed interval runs up to the instant the silence
//! was detected.

use super::engine::{now_seconds, Engine};
use super::formatter::format_duration;
use super::messages::Message;
use super::shutdown::Shutdown;
use crate::msg_debug;
use tokio::time::{self, MissedTickBehavior};

pub struct InactivityMonitor {
    engine: Engine,
}

impl InactivityMonitor {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Runs one check at `now`. Returns `true` if the status changed.
    pub fn tick(&self, now: f64) -> bool {
        let changed = self.engine.force_inactive_if_silent(now);
        if changed {
            let active = self.engine.read(|state| state.total_active_seconds());
            msg_debug!(Message::StatusBecameInactive(format_duration(active)));
        }
        changed
    }

    /// Checks for silence every poll interval until `shutdown` fires.
    pub async fn run(self, mut shutdown: Shutdown) {
        let mut ticker = time::interval(self.engine.config().poll_duration());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {}
            }
            self.tick(now_seconds());
        }
    }
}
