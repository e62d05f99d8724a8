//! Error types for the command line

use std::path::PathBuf;

/// Errors that stop a command before it produces a report
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// IO error reading input or configuration
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::RelayConfig`]
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration values are out of range
    #[error("configuration error: {0}")]
    Config(String),

    /// Input batch is not a JSON array or JSON Lines
    #[error("invalid input at line {line}: {message}")]
    InvalidInput { line: usize, message: String },

    /// Agent selection failed
    #[error("agent routing failed: {0}")]
    Agent(#[from] relay_router::AgentRouteError),

    /// Writing the report failed
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// Report serialization failed
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<relay_artifact::ConfigError> for CliError {
    fn from(err: relay_artifact::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        let err = CliError::InvalidInput {
            line: 3,
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "invalid input at line 3: expected value");
    }

    #[test]
    fn config_error_conversion() {
        let err: CliError = relay_artifact::ConfigError::ZeroDepth(0).into();
        assert!(matches!(err, CliError::Config(_)));
    }
}
