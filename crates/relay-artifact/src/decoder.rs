//! Artifact decoder
//!
//! Recovers an [`Artifact`] from a raw stored value that may have been
//! JSON-encoded more than once by the storage transport.
//!
//! # Algorithm
//!
//! ```text
//! raw ──► string? ──trim empty──► Skipped(empty)
//!   │        │
//!   │        └──► parse ──err──► Failed(parse_error, n)
//!   │               │
//!   │               └── still a string? repeat (≤ max_reencode_depth parses)
//!   │                                      └── exhausted ──► Failed(max_reencode_exceeded)
//!   ▼
//! classify: object ► Decoded | null ► Failed(null) | array ► Failed(is_array)
//!           number/bool ► Failed(wrong_type:<t>)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::artifact::Artifact;
use crate::error::ConfigError;
use crate::outcome::{DecodeOutcome, FailureReason};
use crate::raw::JsonType;

/// Default cap on JSON parses for a single raw value
pub const DEFAULT_MAX_REENCODE_DEPTH: u32 = 3;

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Maximum number of JSON parses attempted for one raw string
    pub max_reencode_depth: u32,
}

impl DecoderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different re-parse cap
    #[inline]
    #[must_use]
    pub fn with_max_reencode_depth(mut self, depth: u32) -> Self {
        self.max_reencode_depth = depth;
        self
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroDepth`] when no parse would be allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_reencode_depth == 0 {
            return Err(ConfigError::ZeroDepth(self.max_reencode_depth));
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_reencode_depth: DEFAULT_MAX_REENCODE_DEPTH,
        }
    }
}

/// Pure, stateless artifact decoder
///
/// Cheap to copy and safe to share across threads; each call is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactDecoder {
    max_reencode_depth: u32,
}

impl Default for ArtifactDecoder {
    fn default() -> Self {
        Self {
            max_reencode_depth: DEFAULT_MAX_REENCODE_DEPTH,
        }
    }
}

impl ArtifactDecoder {
    /// Decoder with the default re-parse cap
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder from validated configuration
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn with_config(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_reencode_depth: config.max_reencode_depth,
        })
    }

    /// Configured re-parse cap
    #[inline]
    #[must_use]
    pub fn max_reencode_depth(&self) -> u32 {
        self.max_reencode_depth
    }

    /// Decode one raw value
    #[must_use]
    pub fn decode(&self, raw: &Value) -> DecodeOutcome {
        match raw {
            Value::String(text) => self.unwrap_string(text),
            other => classify(other.clone(), 0),
        }
    }

    /// Decode a raw value that is already known to be a string
    ///
    /// Equivalent to `decode(&Value::String(text.into()))` without the copy.
    #[must_use]
    pub fn decode_str(&self, text: &str) -> DecodeOutcome {
        self.unwrap_string(text)
    }

    /// Peel string layers until a non-string appears or the cap is hit
    fn unwrap_string(&self, text: &str) -> DecodeOutcome {
        if text.trim().is_empty() {
            return DecodeOutcome::empty();
        }

        let mut attempts = 0;
        let mut current = match parse(text, &mut attempts) {
            Ok(value) => value,
            Err(outcome) => return outcome,
        };

        loop {
            let inner = match current {
                Value::String(inner) => inner,
                other => return classify(other, attempts),
            };
            if attempts >= self.max_reencode_depth {
                return DecodeOutcome::failed(FailureReason::MaxReencodeExceeded, attempts);
            }
            current = match parse(&inner, &mut attempts) {
                Ok(value) => value,
                Err(outcome) => return outcome,
            };
        }
    }
}

fn parse(text: &str, attempts: &mut u32) -> Result<Value, DecodeOutcome> {
    *attempts += 1;
    serde_json::from_str(text)
        .map_err(|_| DecodeOutcome::failed(FailureReason::ParseError, *attempts))
}

fn classify(candidate: Value, attempts: u32) -> DecodeOutcome {
    match candidate {
        Value::Object(map) => DecodeOutcome::decoded(Artifact::new(map)),
        Value::Null => DecodeOutcome::failed(FailureReason::Null, attempts),
        Value::Array(_) => DecodeOutcome::failed(FailureReason::IsArray, attempts),
        Value::Number(_) => {
            DecodeOutcome::failed(FailureReason::WrongType(JsonType::Number), attempts)
        }
        Value::Bool(_) => {
            DecodeOutcome::failed(FailureReason::WrongType(JsonType::Boolean), attempts)
        }
        // Unreachable from the string loop, which only exits on non-strings.
        Value::String(_) => DecodeOutcome::failed(FailureReason::MaxReencodeExceeded, attempts),
    }
}
