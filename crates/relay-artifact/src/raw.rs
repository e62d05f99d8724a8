//! Raw value classification
//!
//! Stored artifact fields are declared as arbitrary JSON, so the decoder and
//! its diagnostics need a name for whatever shape actually arrived.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Shape of a raw JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawKind {
    /// JSON string (possibly an encoded artifact)
    String,
    /// JSON object
    Object,
    /// JSON array
    Array,
    /// JSON null
    Null,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
}

impl RawKind {
    /// Classify a value
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::Null => Self::Null,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
        }
    }

    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive type that cannot hold an artifact
///
/// Strings never reach classification (they are parsed again), so only
/// numbers and booleans are reported as the wrong type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
}

impl JsonType {
    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
