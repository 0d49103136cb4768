//! Input event sources.
//!
//! An [`InputSource`] produces raw key and click signals and pushes them into
//! an unbounded channel. The tracker attaches the foreground window label to
//! each signal and hands the resulting [`InputEvent`] to the engine.
//!
//! ## Implementations
//!
//! - [`RdevInputSource`]: global keyboard and mouse hooks via `rdev`
//! - [`SimulatedInputSource`]: random keypresses, for machines without hooks
//! - [`NoopInputSource`]: emits nothing; events can still be injected
//!
//! The source is chosen once with [`select_input_source`]; nothing else in the
//! crate checks which capability is present.

use super::config::InputMode;
use super::engine::now_seconds;
use super::error::TrackerError;
use super::messages::Message;
use super::shutdown::Shutdown;
use crate::msg_error;
use rand::Rng;
use rdev::{listen, Event, EventType};
use serde::Serialize;
use std::sync::mpsc as std_mpsc;
use std::time::{Duration, UNIX_EPOCH};
use tokio::sync::mpsc::UnboundedSender;

/// How long a live source may take to report a startup failure.
const LISTENER_STARTUP_GRACE: Duration = Duration::from_millis(200);

/// Input signal before the window label is resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    Key { timestamp: f64 },
    Click { timestamp: f64, pressed: bool },
}

impl RawInput {
    /// Attaches the foreground window label.
    pub fn with_label(self, window_label: String) -> InputEvent {
        match self {
            RawInput::Key { timestamp } => InputEvent::Key { timestamp, window_label },
            RawInput::Click { timestamp, pressed } => InputEvent::Click {
                timestamp,
                window_label,
                pressed,
            },
        }
    }
}

/// Input event as consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InputEvent {
    Key {
        timestamp: f64,
        window_label: String,
    },
    Click {
        timestamp: f64,
        window_label: String,
        pressed: bool,
    },
}

/// A capability that delivers input signals until shutdown.
pub trait InputSource: Send {
    fn name(&self) -> &'static str;

    /// Starts producing signals into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InputSourceUnavailable`] if the capability
    /// cannot run on this machine.
    fn start(self: Box<Self>, sink: UnboundedSender<RawInput>, shutdown: Shutdown) -> Result<(), TrackerError>;
}

/// Builds the input source for `mode`.
pub fn select_input_source(mode: InputMode) -> Box<dyn InputSource> {
    match mode {
        InputMode::Live => Box::new(RdevInputSource),
        InputMode::Simulated => Box::new(SimulatedInputSource::default()),
        InputMode::None => Box::new(NoopInputSource),
    }
}

/// Global keyboard and mouse hooks.
///
/// `rdev::listen` blocks for the lifetime of the hook, so it runs on its own
/// thread. After shutdown the callback drops every event.
pub struct RdevInputSource;

impl RdevInputSource {
    fn translate(event: &Event) -> Option<RawInput> {
        let timestamp = event
            .time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_else(|_| now_seconds());
        match event.event_type {
            EventType::KeyPress(_) => Some(RawInput::Key { timestamp }),
            EventType::ButtonPress(_) => Some(RawInput::Click {
                timestamp,
                pressed: true,
            }),
            EventType::ButtonRelease(_) => Some(RawInput::Click {
                timestamp,
                pressed: false,
            }),
            _ => None,
        }
    }
}

impl InputSource for RdevInputSource {
    fn name(&self) -> &'static str {
        "live"
    }

    fn start(self: Box<Self>, sink: UnboundedSender<RawInput>, shutdown: Shutdown) -> Result<(), TrackerError> {
        let (error_tx, error_rx) = std_mpsc::channel::<String>();

        std::thread::Builder::new()
            .name("keytime-input".to_string())
            .spawn(move || {
                let result = listen(move |event: Event| {
                    if shutdown.is_triggered() {
                        return;
                    }
                    if let Some(raw) = RdevInputSource::translate(&event) {
                        let _ = sink.send(raw);
                    }
                });
                if let Err(e) = result {
                    let error = format!("{:?}", e);
                    msg_error!(Message::InputListenerError(error.clone()));
                    let _ = error_tx.send(error);
                }
            })
            .map_err(|e| TrackerError::InputSourceUnavailable(e.to_string()))?;

        match error_rx.recv_timeout(LISTENER_STARTUP_GRACE) {
            Ok(error) => Err(TrackerError::InputSourceUnavailable(error)),
            Err(_) => Ok(()),
        }
    }
}

/// Emits a keypress with a fixed probability once per interval.
pub struct SimulatedInputSource {
    interval: Duration,
    probability: f64,
}

impl SimulatedInputSource {
    pub fn new(interval: Duration, probability: f64) -> Self {
        Self {
            interval,
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl Default for SimulatedInputSource {
    /// One chance per second, 30% each.
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0.3)
    }
}

impl InputSource for SimulatedInputSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn start(self: Box<Self>, sink: UnboundedSender<RawInput>, mut shutdown: Shutdown) -> Result<(), TrackerError> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = shutdown.wait() => break,
                    _ = ticker.tick() => {}
                }
                let press = rand::thread_rng().gen_bool(self.probability);
                if press && sink.send(RawInput::Key { timestamp: now_seconds() }).is_err() {
                    break;
                }
            }
        });
        Ok(())
    }
}

/// Produces no events.
pub struct NoopInputSource;

impl InputSource for NoopInputSource {
    fn name(&self) -> &'static str {
        "none"
    }

    fn start(self: Box<Self>, _sink: UnboundedSender<RawInput>, _shutdown: Shutdown) -> Result<(), TrackerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::shutdown;
    use tokio::sync::mpsc;

    #[test]
    fn test_raw_input_with_label() {
        let event = RawInput::Click {
            timestamp: 2.0,
            pressed: false,
        }
        .with_label("EDITOR".to_string());
        assert_eq!(
            event,
            InputEvent::Click {
                timestamp: 2.0,
                window_label: "EDITOR".to_string(),
                pressed: false
            }
        );
    }

    #[test]
    fn test_select_input_source_names() {
        assert_eq!(select_input_source(InputMode::Live).name(), "live");
        assert_eq!(select_input_source(InputMode::Simulated).name(), "simulated");
        assert_eq!(select_input_source(InputMode::None).name(), "none");
    }

    #[tokio::test]
    async fn test_simulated_source_emits_keys_until_shutdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (trigger, shutdown) = shutdown::channel();
        let source = Box::new(SimulatedInputSource::new(Duration::from_millis(10), 1.0));
        source.start(tx, shutdown).unwrap();

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert!(matches!(first, Some(RawInput::Key { .. })));

        trigger.trigger();
        // The task drops its sender once it observes shutdown
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn test_noop_source_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (_trigger, shutdown) = shutdown::channel();
        Box::new(NoopInputSource).start(tx, shutdown).unwrap();
        assert_eq!(rx.recv().await, None);
    }
}
