//! Configuration management for keytime.
//!
//! Settings are split into two optional modules:
//!
//! - **Engine**: accounting parameters fixed for the lifetime of an engine
//!   (inactivity threshold, ledger capacity, inactivity poll interval)
//! - **Display**: how the `watch` command presents snapshots and where its
//!   input comes from
//!
//! The configuration is stored as pretty-printed JSON in the platform data
//! directory (see [`DataStorage`]). A missing file is not an error: every
//! module falls back to its defaults.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use keytime::libs::config::Config;
//!
//! let config = Config::read()?;
//! let engine = config.engine.unwrap_or_default();
//! engine.validate()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::error::TrackerError;
use super::formatter::seconds_to_duration;
use super::ledger::DEFAULT_LEDGER_CAPACITY;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::time::Duration;

/// Configuration file name inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the interactive setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Where the tracker gets its input events from.
///
/// The capability is chosen once, when the tracker is built. A live source
/// that fails to start degrades to no input instead of aborting.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Global keyboard and mouse hooks.
    #[default]
    Live,
    /// Randomly generated keypresses, roughly one every three seconds.
    Simulated,
    /// No input at all; events can still be injected programmatically.
    None,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Live, InputMode::Simulated, InputMode::None];
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Live => write!(f, "live"),
            InputMode::Simulated => write!(f, "simulated"),
            InputMode::None => write!(f, "none"),
        }
    }
}

/// Accounting engine settings.
///
/// These values are fixed for the lifetime of an engine. The histogram size
/// is not configurable and is always sixty slots.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Inactivity threshold in seconds.
    ///
    /// Gaps between events shorter than this count as continuous typing, and
    /// this much silence flips the status to inactive.
    pub inactivity_threshold: f64,

    /// Maximum number of distinct programs kept in the time ledger.
    pub ledger_capacity: usize,

    /// Interval in seconds between inactivity checks.
    pub poll_interval: f64,
}

impl Default for EngineConfig {
    /// Defaults: 5 second threshold, 100 programs, 1 second polling.
    fn default() -> Self {
        EngineConfig {
            inactivity_threshold: 5.0,
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
            poll_interval: 1.0,
        }
    }
}

impl EngineConfig {
    /// Rejects values that would make the accounting meaningless.
    ///
    /// Called before an engine accepts any event, so bad settings fail fast.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !self.inactivity_threshold.is_finite() || self.inactivity_threshold <= 0.0 {
            return Err(TrackerError::InvalidThreshold(self.inactivity_threshold));
        }
        if seconds_to_duration(self.poll_interval).is_none() {
            return Err(TrackerError::InvalidPollInterval(self.poll_interval));
        }
        if self.ledger_capacity == 0 {
            return Err(TrackerError::InvalidLedgerCapacity);
        }
        Ok(())
    }

    /// Poll interval as a [`Duration`], one second if the value is unusable.
    pub fn poll_duration(&self) -> Duration {
        seconds_to_duration(self.poll_interval).unwrap_or(Duration::from_secs(1))
    }
}

/// Presentation settings for the `watch` command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Seconds between dashboard redraws.
    pub refresh_interval: f64,

    /// Number of programs listed on the dashboard (at most 20 are kept in a snapshot).
    pub top_windows: usize,

    /// Input source used by the tracker.
    #[serde(default)]
    pub input: InputMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            refresh_interval: 0.5,
            top_windows: 20,
            input: InputMode::Live,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if seconds_to_duration(self.refresh_interval).is_none() {
            return Err(TrackerError::InvalidRefreshInterval(self.refresh_interval));
        }
        Ok(())
    }

    /// Refresh interval as a [`Duration`], half a second if the value is unusable.
    pub fn refresh_duration(&self) -> Duration {
        seconds_to_duration(self.refresh_interval).unwrap_or(Duration::from_millis(500))
    }
}

/// Root configuration container.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

impl Config {
    /// Reads the configuration file, returning defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Engine settings with defaults applied, validated.
    pub fn engine_or_default(&self) -> Result<EngineConfig, TrackerError> {
        let engine = self.engine.clone().unwrap_or_default();
        engine.validate()?;
        Ok(engine)
    }

    /// Display settings with defaults applied, validated.
    pub fn display_or_default(&self) -> Result<DisplayConfig, TrackerError> {
        let display = self.display.clone().unwrap_or_default();
        display.validate()?;
        Ok(display)
    }

    /// Runs the interactive setup wizard.
    ///
    /// Starts from the current configuration (or defaults), lets the user pick
    /// modules and prompts for each of their values. The result is validated
    /// but not saved.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "engine".to_string(),
                name: Message::ConfigModuleEngine.to_string(),
            },
            ConfigModule {
                key: "display".to_string(),
                name: Message::ConfigModuleDisplay.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "engine" => {
                    let default = config.engine.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleEngine);
                    let engine = EngineConfig {
                        inactivity_threshold: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptInactivityThreshold.to_string())
                            .default(default.inactivity_threshold)
                            .interact_text()?,
                        ledger_capacity: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptLedgerCapacity.to_string())
                            .default(default.ledger_capacity)
                            .interact_text()?,
                        poll_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval)
                            .interact_text()?,
                    };
                    engine.validate()?;
                    config.engine = Some(engine);
                }
                "display" => {
                    let default = config.display.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleDisplay);
                    let modes: Vec<String> = InputMode::ALL.iter().map(|m| m.to_string()).collect();
                    let default_mode = InputMode::ALL.iter().position(|m| *m == default.input).unwrap_or(0);
                    let display = DisplayConfig {
                        refresh_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRefreshInterval.to_string())
                            .default(default.refresh_interval)
                            .interact_text()?,
                        top_windows: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTopWindows.to_string())
                            .default(default.top_windows)
                            .interact_text()?,
                        input: InputMode::ALL[Select::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptInputMode.to_string())
                            .items(&modes)
                            .default(default_mode)
                            .interact()?],
                    };
                    display.validate()?;
                    config.display = Some(display);
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
