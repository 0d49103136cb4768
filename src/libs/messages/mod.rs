//! Centralized user-facing messages for keytime.
//!
//! Every piece of text the application prints goes through the [`Message`]
//! enum, whose `Display` implementation lives in [`display`]. The `msg_*!`
//! macros in [`macros`] route messages either to the console or, in debug
//! mode, to `tracing`.
//!
//! ## Usage
//!
//! ```rust
//! use keytime::libs::messages::Message;
//! use keytime::msg_info;
//!
//! msg_info!(Message::WatchStarted);
//! ```

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
