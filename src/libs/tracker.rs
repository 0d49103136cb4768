//! Tracker runtime.
//!
//! Wires the collaborators around one [`Engine`]:
//!
//! ```text
//! InputSource ──RawInput──▶ ingestion task ──InputEvent──▶ Engine ◀── InactivityMonitor
//!                               │ WindowResolver                │
//!                                                               ▼
//!                                              presentation loop (snapshots only)
//! ```
//!
//! All three loops stop on the same [`Shutdown`] signal. A live input source
//! that cannot start is reported once and the tracker keeps running without
//! input.

use super::config::{DisplayConfig, EngineConfig};
use super::engine::{now_seconds, Engine};
use super::error::TrackerError;
use super::input::{InputSource, RawInput};
use super::messages::Message;
use super::metrics::Snapshot;
use super::monitor::InactivityMonitor;
use super::shutdown::Shutdown;
use super::state::UNKNOWN_WINDOW;
use super::window::{StaticWindowResolver, WindowResolver};
use crate::{msg_debug, msg_warning};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task;
use tokio::time::{self, MissedTickBehavior};

pub struct Tracker {
    engine: Engine,
    display: DisplayConfig,
    input: Box<dyn InputSource>,
    resolver: Box<dyn WindowResolver>,
}

impl Tracker {
    /// Builds a tracker whose session starts now.
    ///
    /// # Errors
    ///
    /// Fails if either configuration is invalid.
    pub fn new(
        engine_config: EngineConfig,
        display: DisplayConfig,
        input: Box<dyn InputSource>,
        resolver: Box<dyn WindowResolver>,
    ) -> Result<Self, TrackerError> {
        display.validate()?;
        let engine = Engine::start_now(engine_config)?;
        Ok(Self {
            engine,
            display,
            input,
            resolver,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Runs until `shutdown` fires, calling `on_refresh` with a fresh snapshot
    /// every refresh interval. Returns the final snapshot.
    pub async fn run<F>(self, shutdown: Shutdown, mut on_refresh: F) -> Snapshot
    where
        F: FnMut(&Snapshot),
    {
        let Tracker {
            engine,
            display,
            input,
            resolver,
        } = self;

        let (tx, rx) = mpsc::unbounded_channel();
        msg_debug!(Message::InputModeSelected(input.name().to_string()));
        if let Err(e) = input.start(tx, shutdown.clone()) {
            msg_warning!(Message::InputSourceUnavailable(e.to_string()));
        }

        let monitor = tokio::spawn(InactivityMonitor::new(engine.clone()).run(shutdown.clone()));
        let ingestion = tokio::spawn(ingest(engine.clone(), resolver, rx, shutdown.clone()));

        let mut shutdown = shutdown;
        let mut ticker = time::interval(display.refresh_duration());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {}
            }
            on_refresh(&engine.snapshot(now_seconds()));
        }

        let _ = monitor.await;
        let _ = ingestion.await;
        engine.snapshot(now_seconds())
    }
}

/// Drains input signals, labels them and feeds them to the engine.
async fn ingest(
    engine: Engine,
    mut resolver: Box<dyn WindowResolver>,
    mut rx: UnboundedReceiver<RawInput>,
    mut shutdown: Shutdown,
) {
    loop {
        let raw = tokio::select! {
            _ = shutdown.wait() => break,
            raw = rx.recv() => raw,
        };
        let Some(raw) = raw else {
            msg_debug!(Message::InputChannelClosed);
            shutdown.wait().await;
            break;
        };

        // Process lookups can block
        let (returned, label) = resolve_blocking(resolver).await;
        resolver = returned;
        let outcome = engine.record(&raw.with_label(label.clone()));
        if outcome.activated {
            msg_debug!(Message::StatusBecameActive(label.clone()));
        }
        if outcome.ledger_dropped {
            msg_debug!(Message::LedgerLabelDropped(label));
        }
    }
}

/// Runs one window lookup on the blocking pool and hands the resolver back.
async fn resolve_blocking(mut resolver: Box<dyn WindowResolver>) -> (Box<dyn WindowResolver>, String) {
    match task::spawn_blocking(move || {
        let label = resolver.resolve();
        (resolver, label)
    })
    .await
    {
        Ok(resolved) => resolved,
        Err(e) => {
            msg_warning!(Message::WindowResolutionFailed(e.to_string()));
            (Box::new(StaticWindowResolver::unknown()), UNKNOWN_WINDOW.to_string())
        }
    }
}
