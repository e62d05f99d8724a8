//! Error types for the artifact crate
//!
//! Decoding itself never errors (see [`crate::DecodeOutcome`]); only
//! configuration can be rejected.

/// Invalid decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The re-parse cap must allow at least one parse
    #[error("max_reencode_depth must be at least 1, got {0}")]
    ZeroDepth(u32),
}
