//! Core library modules for keytime.
//!
//! ## Modules
//!
//! - **Accounting**: `state` (status machine), `ledger`, `histogram`, `engine`
//! - **Derived data**: `metrics`, `formatter`, `view`
//! - **Runtime**: `monitor`, `tracker`, `shutdown`
//! - **Collaborators**: `input` (event sources), `window` (foreground program)
//! - **Infrastructure**: `config`, `data_storage`, `error`, `messages`
//!
//! ## Usage
//!
//! ```rust
//! use keytime::libs::config::EngineConfig;
//! use keytime::libs::engine::Engine;
//!
//! let engine = Engine::new(EngineConfig::default(), 0.0)?;
//! engine.record_click_event(1.0, "BROWSER", true);
//! assert_eq!(engine.snapshot(1.0).total_clicks, 1);
//! # Ok::<(), keytime::libs::error::TrackerError>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod histogram;
pub mod input;
pub mod ledger;
pub mod messages;
pub mod metrics;
pub mod monitor;
pub mod shutdown;
pub mod state;
pub mod tracker;
pub mod view;
pub mod window;
