#[cfg(test)]
mod tests {
    use keytime::libs::config::{Config, DisplayConfig, EngineConfig, InputMode};
    use keytime::libs::error::TrackerError;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Serializes tests that repoint the data directory through the environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Test context to ensure a clean environment for each config test.
    /// It sets up a temporary directory to act as the user's home/appdata directory.
    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        inactivity_threshold: f64,
        ledger_capacity: usize,
        poll_interval: f64,
        refresh_interval: f64,
        top_windows: usize,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                inactivity_threshold: 5.0,
                ledger_capacity: 100,
                poll_interval: 1.0,
                refresh_interval: 0.5,
                top_windows: 20,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        // When no config file exists, read() should return the default config.
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert!(config.engine.is_none());
        assert!(config.display.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(_ctx: &mut ConfigTestContext) {
        let config = Config {
            engine: Some(EngineConfig {
                inactivity_threshold: 2.5,
                ledger_capacity: 10,
                poll_interval: 0.25,
            }),
            display: Some(DisplayConfig {
                refresh_interval: 2.0,
                top_windows: 5,
                input: InputMode::Simulated,
            }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        assert_eq!(read_config, config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_config(_ctx: &mut ConfigTestContext) {
        assert!(!Config::delete().unwrap());
        Config::default().save().unwrap();
        assert!(Config::delete().unwrap());
        assert_eq!(Config::read().unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_input_mode_defaults_when_missing(_ctx: &mut ConfigTestContext) {
        let json = r#"{ "display": { "refresh_interval": 1.0, "top_windows": 3 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.display.unwrap().input, InputMode::Live);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_engine_config(ctx: &mut ConfigTestContext) {
        let engine = EngineConfig::default();
        assert_eq!(engine.inactivity_threshold, ctx.inactivity_threshold);
        assert_eq!(engine.ledger_capacity, ctx.ledger_capacity);
        assert_eq!(engine.poll_interval, ctx.poll_interval);
        assert!(engine.validate().is_ok());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_display_config(ctx: &mut ConfigTestContext) {
        let display = DisplayConfig::default();
        assert_eq!(display.refresh_interval, ctx.refresh_interval);
        assert_eq!(display.top_windows, ctx.top_windows);
        assert_eq!(display.input, InputMode::Live);
    }

    #[test]
    fn test_engine_config_validation() {
        let bad_threshold = EngineConfig {
            inactivity_threshold: -1.0,
            ..Default::default()
        };
        assert_eq!(bad_threshold.validate(), Err(TrackerError::InvalidThreshold(-1.0)));

        let bad_poll = EngineConfig {
            poll_interval: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_poll.validate(), Err(TrackerError::InvalidPollInterval(0.0)));

        let bad_capacity = EngineConfig {
            ledger_capacity: 0,
            ..Default::default()
        };
        assert_eq!(bad_capacity.validate(), Err(TrackerError::InvalidLedgerCapacity));

        let nan_threshold = EngineConfig {
            inactivity_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(nan_threshold.validate().is_err());
    }

    #[test]
    fn test_intervals_must_fit_a_duration() {
        for poll_interval in [1e-12, 1e30, f64::INFINITY] {
            let engine = EngineConfig {
                poll_interval,
                ..Default::default()
            };
            assert_eq!(engine.validate(), Err(TrackerError::InvalidPollInterval(poll_interval)));
        }

        for refresh_interval in [1e-12, 1e30] {
            let display = DisplayConfig {
                refresh_interval,
                ..Default::default()
            };
            assert_eq!(display.validate(), Err(TrackerError::InvalidRefreshInterval(refresh_interval)));
            assert!(!display.refresh_duration().is_zero());
        }

        let engine = EngineConfig {
            poll_interval: 1e-12,
            ..Default::default()
        };
        assert!(!engine.poll_duration().is_zero());
        assert!(keytime::libs::engine::Engine::new(engine, 0.0).is_err());
    }

    #[test]
    fn test_effective_config_rejects_invalid_sections() {
        let config = Config {
            engine: None,
            display: Some(DisplayConfig {
                refresh_interval: 0.0,
                ..Default::default()
            }),
        };
        assert!(config.engine_or_default().is_ok());
        assert_eq!(config.display_or_default(), Err(TrackerError::InvalidRefreshInterval(0.0)));
    }
}
