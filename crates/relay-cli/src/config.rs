//! Relay configuration
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! ```toml
//! [decoder]
//! max_reencode_depth = 3
//!
//! [logging]
//! filter = "info"
//! json = false
//!
//! [agents]
//! default = "general"
//! ```

use std::path::Path;

use relay_artifact::{ArtifactDecoder, DecoderConfig};
use relay_router::{AgentRouter, DEFAULT_AGENT};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Decoder settings
    pub decoder: DecoderConfig,
    /// Log output settings
    pub logging: LoggingConfig,
    /// Agent routing settings
    pub agents: AgentsConfig,
}

impl RelayConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`CliError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
        let config: Self = toml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.decoder.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// With a different re-parse cap
    #[inline]
    #[must_use]
    pub fn with_max_reencode_depth(mut self, depth: u32) -> Self {
        self.decoder.max_reencode_depth = depth;
        self
    }

    /// With a different log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.logging.filter = filter.into();
        self
    }

    /// Build the decoder
    ///
    /// # Errors
    /// Returns [`CliError::Config`] if the decoder settings are invalid.
    pub fn decoder(&self) -> Result<ArtifactDecoder, CliError> {
        Ok(ArtifactDecoder::with_config(self.decoder)?)
    }

    /// Build the agent router
    ///
    /// # Errors
    /// Returns [`CliError::Agent`] if a built-in route fails to compile.
    pub fn agent_router(&self) -> Result<AgentRouter, CliError> {
        Ok(AgentRouter::with_defaults()?.with_default_agent(self.agents.default.clone()))
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
    /// Emit JSON log lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Agent routing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentsConfig {
    /// Fallback agent id
    pub default: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_AGENT.to_string(),
        }
    }
}
