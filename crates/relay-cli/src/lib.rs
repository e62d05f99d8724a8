//! Artifact Relay command line
//!
//! Library half of the `artifact-relay` binary: configuration, batch input,
//! logging setup, and the subcommands themselves.

#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;

pub use commands::CommandStatus;
pub use config::{AgentsConfig, LoggingConfig, RelayConfig};
pub use error::CliError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
