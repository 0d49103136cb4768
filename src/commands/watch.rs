//! Live activity tracking command.
//!
//! Builds a tracker from the stored configuration (overridden by flags),
//! redraws the dashboard every refresh interval and prints a summary when
//! stopped with Ctrl+C, SIGTERM or after `--duration` seconds.

use crate::libs::config::{Config, InputMode};
use crate::libs::engine::now_seconds;
use crate::libs::formatter::{format_clock_time, seconds_to_duration};
use crate::libs::input::select_input_source;
use crate::libs::messages::Message;
use crate::libs::shutdown::{self, ShutdownTrigger};
use crate::libs::tracker::Tracker;
use crate::libs::view::View;
use crate::libs::window::{CachedWindowResolver, ProcessWindowResolver, DEFAULT_REFRESH_INTERVAL};
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Generate random keypresses instead of hooking the real input devices
    #[arg(long, conflicts_with = "no_input")]
    simulate: bool,

    /// Run without any input source
    #[arg(long)]
    no_input: bool,

    /// Print snapshots as JSON lines instead of drawing the dashboard
    #[arg(long)]
    json: bool,

    /// Stop automatically after this many seconds
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// Override the inactivity threshold in seconds
    #[arg(long, value_name = "SECS")]
    threshold: Option<f64>,
}

pub async fn cmd(args: WatchArgs) -> Result<()> {
    let limit = duration_limit(args.duration)?;
    let config = Config::read()?;
    let mut engine_config = config.engine.clone().unwrap_or_default();
    if let Some(threshold) = args.threshold {
        engine_config.inactivity_threshold = threshold;
    }
    let mut display = config.display.clone().unwrap_or_default();
    if args.simulate {
        display.input = InputMode::Simulated;
    } else if args.no_input {
        display.input = InputMode::None;
    }

    let input = select_input_source(display.input);
    let resolver = Box::new(CachedWindowResolver::new(ProcessWindowResolver::new(), DEFAULT_REFRESH_INTERVAL));
    let top_windows = display.top_windows;
    let tracker = match Tracker::new(engine_config, display, input, resolver) {
        Ok(tracker) => tracker,
        Err(e) => msg_bail_anyhow!(Message::ConfigInvalid(e.to_string())),
    };

    let (trigger, shutdown) = shutdown::channel();
    let trigger = Arc::new(trigger);
    spawn_signal_handler(trigger.clone());
    if let Some(limit) = limit {
        let trigger = trigger.clone();
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            msg_info!(Message::WatchDurationElapsed(limit.as_secs_f64()));
            trigger.trigger();
        });
    }

    msg_info!(Message::SessionStarted(format_clock_time(now_seconds())));
    msg_info!(Message::WatchStarted);

    let json = args.json;
    let final_snapshot = tracker
        .run(shutdown, |snapshot| {
            if json {
                if let Ok(line) = serde_json::to_string(snapshot) {
                    println!("{}", line);
                }
            } else {
                View::dashboard(snapshot, top_windows);
            }
        })
        .await;

    if json {
        println!("{}", serde_json::to_string(&final_snapshot)?);
    } else {
        View::summary(&final_snapshot, top_windows);
    }
    msg_success!(Message::WatchStopped);
    Ok(())
}

/// Converts `--duration` into a sleep length, rejecting values a timer cannot hold.
fn duration_limit(secs: Option<f64>) -> Result<Option<Duration>> {
    match secs {
        None => Ok(None),
        Some(secs) => match seconds_to_duration(secs) {
            Some(limit) => Ok(Some(limit)),
            None => msg_bail_anyhow!(Message::WatchInvalidDuration(secs)),
        },
    }
}

/// Triggers shutdown on Ctrl+C, or SIGTERM on Unix.
fn spawn_signal_handler(trigger: Arc<ShutdownTrigger>) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = sigterm.recv() => msg_info!(Message::WatchReceivedSigterm),
                        _ = tokio::signal::ctrl_c() => msg_info!(Message::WatchReceivedCtrlC),
                    }
                }
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    msg_info!(Message::WatchReceivedCtrlC);
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
            msg_info!(Message::WatchReceivedCtrlC);
        }

        trigger.trigger();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_limit() {
        assert_eq!(duration_limit(None).unwrap(), None);
        assert_eq!(duration_limit(Some(1.5)).unwrap(), Some(Duration::from_millis(1500)));
        assert!(duration_limit(Some(1e30)).is_err());
        assert!(duration_limit(Some(0.0)).is_err());
        assert!(duration_limit(Some(-3.0)).is_err());
        assert!(duration_limit(Some(f64::NAN)).is_err());
    }
}
