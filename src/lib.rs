//! # Keytime - keyboard and mouse activity time accounting
//!
//! A command-line utility that observes input events and the foreground
//! program and turns them into running totals.
//!
//! ## Features
//!
//! - **Typing Time**: Continuous engagement time from short gaps between events
//! - **Active/Inactive Time**: Coarse status time with silence detection
//! - **Program Ledger**: Time allocation per foreground program
//! - **Rates**: Keys and clicks per minute, efficiency percentage
//! - **Activity Histogram**: Keypress intensity per second of the minute
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keytime::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
