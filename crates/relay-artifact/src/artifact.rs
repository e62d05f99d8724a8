//! Decoded artifact model
//!
//! An [`Artifact`] is the structured record an agent produced for display:
//! a JSON object whose `kind` key selects the render handler and whose
//! `payload` key carries handler-specific data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::raw::RawKind;

/// Key holding the render discriminator
pub const KIND_KEY: &str = "kind";

/// Key holding handler-specific data
pub const PAYLOAD_KEY: &str = "payload";

/// A decoded, renderable artifact
///
/// Always backed by a JSON object. Construction from anything other than an
/// object is rejected, so holders never need to re-check the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact(Map<String, Value>);

impl Artifact {
    /// Wrap an object map
    #[inline]
    #[must_use]
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Render discriminator, when present and a string
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.0.get(KIND_KEY).and_then(Value::as_str)
    }

    /// Whether the `kind` key is present at all (string or not)
    #[inline]
    #[must_use]
    pub fn has_kind_key(&self) -> bool {
        self.0.contains_key(KIND_KEY)
    }

    /// Handler data, when present and an object
    #[must_use]
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.0.get(PAYLOAD_KEY).and_then(Value::as_object)
    }

    /// Look up a top-level key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying object
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying object
    #[inline]
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Convert back into a JSON value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Artifact {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Artifact {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NotAnObject(RawKind::of(&other))),
        }
    }
}

/// Attempted to build an artifact from a non-object value
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("artifact must be a JSON object, got {0}")]
pub struct NotAnObject(pub RawKind);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(value: Value) -> Artifact {
        Artifact::try_from(value).unwrap()
    }

    #[test]
    fn kind_and_payload_accessors() {
        let a = artifact(json!({"kind": "wind_rose", "payload": {"meanSpeed": 7.95}}));
        assert_eq!(a.kind(), Some("wind_rose"));
        assert_eq!(a.payload().unwrap()["meanSpeed"], json!(7.95));
    }

    #[test]
    fn non_string_kind_is_not_a_kind() {
        let a = artifact(json!({"kind": 7}));
        assert_eq!(a.kind(), None);
        assert!(a.has_kind_key());
    }

    #[test]
    fn payload_must_be_object() {
        let a = artifact(json!({"kind": "report", "payload": [1, 2]}));
        assert!(a.payload().is_none());
    }

    #[test]
    fn try_from_rejects_non_objects() {
        assert_eq!(
            Artifact::try_from(json!([1])).unwrap_err(),
            NotAnObject(RawKind::Array)
        );
        assert_eq!(
            Artifact::try_from(Value::Null).unwrap_err().to_string(),
            "artifact must be a JSON object, got null"
        );
    }

    #[test]
    fn serializes_transparently() {
        let a = artifact(json!({"kind": "report"}));
        assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"kind":"report"}"#);
        let back: Artifact = serde_json::from_str(r#"{"kind":"report"}"#).unwrap();
        assert_eq!(back, a);
    }
}
