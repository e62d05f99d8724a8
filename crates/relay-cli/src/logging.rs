//! Tracing subscriber setup
//!
//! Logs go to stderr so reports on stdout stay machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::CliError;

/// Resolve the filter directive: explicit flag, then `RUST_LOG`, then config
#[must_use]
pub fn resolve_filter(flag: Option<&str>, env: Option<&str>, config: &LoggingConfig) -> String {
    let set = |f: &&str| !f.trim().is_empty();
    flag.filter(set)
        .or_else(|| env.filter(set))
        .unwrap_or(&config.filter)
        .to_string()
}

/// Install the global subscriber
///
/// # Errors
/// Returns [`CliError::Config`] for an invalid filter directive. A subscriber
/// that is already installed is left in place.
pub fn init(filter: &str, json: bool) -> Result<(), CliError> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| CliError::Config(format!("invalid log filter '{filter}': {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
