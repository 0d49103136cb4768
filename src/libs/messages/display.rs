//! Display implementation for keytime application messages.
//!
//! All message text is defined here, in one match, so wording stays
//! consistent across the CLI, the dashboard and the debug log.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file found, using defaults".to_string(),
            Message::ConfigInvalid(reason) => format!("Invalid configuration: {}", reason),
            Message::ConfigModuleEngine => "Engine settings".to_string(),
            Message::ConfigModuleDisplay => "Display settings".to_string(),
            Message::ConfigHeader => "Effective configuration".to_string(),

            // === TRACKER MESSAGES ===
            Message::WatchStarted => "Activity tracking started, press Ctrl+C to stop".to_string(),
            Message::WatchStopped => "Activity tracking stopped".to_string(),
            Message::WatchDurationElapsed(secs) => format!("Requested duration of {} seconds elapsed", secs),
            Message::WatchInvalidDuration(secs) => {
                format!("Invalid duration {}: expected a positive number of seconds", secs)
            }
            Message::WatchReceivedCtrlC => "Received Ctrl+C, shutting down".to_string(),
            Message::WatchReceivedSigterm => "Received SIGTERM, shutting down".to_string(),
            Message::SessionStarted(time) => format!("Session initiated at {}", time),
            Message::StatusBecameActive(label) => format!("Status changed to ACTIVE in {}", label),
            Message::StatusBecameInactive(duration) => {
                format!("Status changed to INACTIVE after silence, total active {}", duration)
            }
            Message::LedgerLabelDropped(label) => format!("Ledger is full, time for '{}' not recorded", label),
            Message::InputModeSelected(mode) => format!("Input mode: {}", mode),

            // === COLLABORATOR MESSAGES ===
            Message::InputSourceUnavailable(reason) => {
                format!("Input tracking unavailable ({}), continuing without live input", reason)
            }
            Message::InputListenerError(error) => format!("Error in input listener: {}", error),
            Message::InputChannelClosed => "Input event channel closed".to_string(),
            Message::WindowResolutionFailed(reason) => format!("Could not resolve foreground program: {}", reason),

            // === DASHBOARD MESSAGES ===
            Message::DashboardHeader => "< KeyTime >".to_string(),
            Message::DashboardTypingTime => "TYPING TIME".to_string(),
            Message::DashboardClicks => "CLICKS".to_string(),
            Message::DashboardEfficiency => "EFFICIENCY".to_string(),
            Message::DashboardActiveTime => "ACTIVE TIME".to_string(),
            Message::DashboardInactiveTime => "INACTIVE TIME".to_string(),
            Message::DashboardStatus => "STATUS".to_string(),
            Message::DashboardCurrentProgram => "CURRENT PROGRAM".to_string(),
            Message::DashboardMostActiveProgram => "MOST ACTIVE PROGRAM".to_string(),
            Message::DashboardKeysPerMinute => "KEYS/MIN".to_string(),
            Message::DashboardClicksPerMinute => "CLICKS/MIN".to_string(),
            Message::DashboardSessionStart => "SESSION INITIATED".to_string(),
            Message::DashboardProgramsHeader => "PROGRAM/PROCESS".to_string(),
            Message::DashboardHistogramHeader => "KEY ACTIVITY (second of minute)".to_string(),
            Message::DashboardNoActivity => "No program activity recorded yet".to_string(),
            Message::FinalSummaryHeader => "Session summary".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptInactivityThreshold => "Inactivity threshold (seconds)".to_string(),
            Message::PromptLedgerCapacity => "Maximum number of tracked programs".to_string(),
            Message::PromptPollInterval => "Inactivity poll interval (seconds)".to_string(),
            Message::PromptRefreshInterval => "Dashboard refresh interval (seconds)".to_string(),
            Message::PromptTopWindows => "Programs shown on the dashboard".to_string(),
            Message::PromptInputMode => "Input source".to_string(),
        };
        write!(f, "{}", s)
    }
}
