//! Decode outcomes
//!
//! Every raw value decodes to exactly one [`DecodeOutcome`]. Expected
//! malformations are values, not errors, so callers can render, skip, or
//! report per artifact without unwinding the whole batch.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::artifact::Artifact;
use crate::raw::JsonType;

/// Result of decoding one raw value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeOutcome {
    /// A mapping ready for routing
    Decoded {
        /// The recovered artifact
        artifact: Artifact,
    },

    /// Nothing was stored; omit without surfacing an error
    Skipped {
        /// Why the value was skipped
        reason: SkipReason,
    },

    /// Something was stored but it cannot be rendered
    Failed(DecodeFailure),
}

impl DecodeOutcome {
    /// Construct a decoded outcome
    #[inline]
    #[must_use]
    pub fn decoded(artifact: Artifact) -> Self {
        Self::Decoded { artifact }
    }

    /// Construct an empty skip
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::Skipped {
            reason: SkipReason::Empty,
        }
    }

    /// Construct a failure
    #[inline]
    #[must_use]
    pub fn failed(reason: FailureReason, attempts: u32) -> Self {
        Self::Failed(DecodeFailure { reason, attempts })
    }

    /// The artifact, if decoding succeeded
    #[inline]
    #[must_use]
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Decoded { artifact } => Some(artifact),
            _ => None,
        }
    }

    /// Take the artifact, if decoding succeeded
    #[inline]
    #[must_use]
    pub fn into_artifact(self) -> Option<Artifact> {
        match self {
            Self::Decoded { artifact } => Some(artifact),
            _ => None,
        }
    }

    /// The failure, if decoding failed
    #[inline]
    #[must_use]
    pub fn failure(&self) -> Option<&DecodeFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Whether an artifact was recovered
    #[inline]
    #[must_use]
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded { .. })
    }

    /// Whether the value was benignly absent
    #[inline]
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Whether the value was malformed
    #[inline]
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Why a value carried no artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Zero-length or all-whitespace string
    Empty,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
        }
    }
}

/// A classified decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DecodeFailure {
    /// Which malformation occurred
    pub reason: FailureReason,
    /// Number of JSON parses performed before giving up
    pub attempts: u32,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} after {} parse attempt(s)", self.reason, self.attempts)
    }
}

/// Malformation classes, all indicating an upstream data defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// Resolved to JSON null
    Null,
    /// Resolved to a primitive that cannot hold an artifact
    WrongType(JsonType),
    /// Resolved to an array
    IsArray,
    /// A string layer was not valid JSON
    ParseError,
    /// Still a string after the maximum number of parses
    MaxReencodeExceeded,
}

impl FailureReason {
    /// Stable machine-readable code, e.g. `wrong_type:number`
    #[must_use]
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::WrongType(ty) => write!(f, "wrong_type:{ty}"),
            Self::IsArray => f.write_str("is_array"),
            Self::ParseError => f.write_str("parse_error"),
            Self::MaxReencodeExceeded => f.write_str("max_reencode_exceeded"),
        }
    }
}

impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reason_codes() {
        assert_eq!(FailureReason::Null.code(), "null");
        assert_eq!(FailureReason::WrongType(JsonType::Number).code(), "wrong_type:number");
        assert_eq!(FailureReason::WrongType(JsonType::Boolean).code(), "wrong_type:boolean");
        assert_eq!(FailureReason::IsArray.code(), "is_array");
        assert_eq!(FailureReason::ParseError.code(), "parse_error");
        assert_eq!(FailureReason::MaxReencodeExceeded.code(), "max_reencode_exceeded");
        assert_eq!(SkipReason::Empty.to_string(), "empty");
    }

    #[test]
    fn outcome_predicates() {
        let failed = DecodeOutcome::failed(FailureReason::IsArray, 0);
        assert!(failed.is_failed());
        assert!(failed.artifact().is_none());
        assert_eq!(failed.failure().map(|f| f.attempts), Some(0));

        assert!(DecodeOutcome::empty().is_skipped());
    }

    #[test]
    fn outcomes_serialize_tagged() {
        let failed = DecodeOutcome::failed(FailureReason::WrongType(JsonType::Number), 1);
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"status": "failed", "reason": "wrong_type:number", "attempts": 1})
        );
        assert_eq!(
            serde_json::to_value(DecodeOutcome::empty()).unwrap(),
            json!({"status": "skipped", "reason": "empty"})
        );
    }

    #[test]
    fn failure_display() {
        let failure = DecodeFailure {
            reason: FailureReason::ParseError,
            attempts: 2,
        };
        assert_eq!(failure.to_string(), "parse_error after 2 parse attempt(s)");
    }
}
