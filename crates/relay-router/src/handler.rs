//! Render handlers
//!
//! A handler turns one decoded artifact into a [`Rendered`] descriptor that a
//! display surface can draw. Drawing itself happens elsewhere.

use relay_artifact::Artifact;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RenderError;

/// Render descriptor handed to the display surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    /// Kind that selected the handler
    pub kind: String,
    /// Display title
    pub title: String,
    /// Handler data
    pub payload: Map<String, Value>,
}

/// Handler for one artifact kind
pub trait RenderHandler: Send + Sync {
    /// Discriminator this handler accepts
    fn kind(&self) -> &str;

    /// Produce a descriptor for `artifact`
    ///
    /// # Errors
    /// Returns [`RenderError`] when the artifact's payload is unusable.
    fn render(&self, artifact: &Artifact) -> Result<Rendered, RenderError>;
}

/// Generic descriptor handler
///
/// Copies the payload through after checking that `required` keys exist.
#[derive(Debug, Clone)]
pub struct DescriptorHandler {
    kind: String,
    default_title: String,
    required: Vec<String>,
}

impl DescriptorHandler {
    /// Handler for `kind` with no required payload keys
    pub fn new(kind: impl Into<String>, default_title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            default_title: default_title.into(),
            required: Vec::new(),
        }
    }

    /// Require a payload key
    #[must_use]
    pub fn require(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }
}

impl RenderHandler for DescriptorHandler {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn render(&self, artifact: &Artifact) -> Result<Rendered, RenderError> {
        let payload = match artifact.get(relay_artifact::PAYLOAD_KEY) {
            None => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => {
                return Err(RenderError::InvalidPayload(
                    "payload must be an object".to_string(),
                ))
            }
        };

        if let Some(missing) = self.required.iter().find(|k| !payload.contains_key(*k)) {
            return Err(RenderError::MissingField(missing.clone()));
        }

        let title = artifact
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(&self.default_title)
            .to_string();

        Ok(Rendered {
            kind: self.kind.clone(),
            title,
            payload,
        })
    }
}

/// Descriptor handlers for the kinds the assistant's agents emit
#[must_use]
pub fn default_handlers() -> Vec<DescriptorHandler> {
    vec![
        DescriptorHandler::new("terrain_map", "Terrain Analysis"),
        DescriptorHandler::new("wind_rose", "Wind Rose"),
        DescriptorHandler::new("report", "Report"),
        DescriptorHandler::new("wind_farm_layout", "Wind Farm Layout").require("turbines"),
        DescriptorHandler::new("wake_simulation", "Wake Simulation"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact(value: Value) -> Artifact {
        Artifact::try_from(value).unwrap()
    }

    #[test]
    fn descriptor_copies_payload() {
        let handler = DescriptorHandler::new("wind_rose", "Wind Rose");
        let rendered = handler
            .render(&artifact(json!({"kind": "wind_rose", "payload": {"meanSpeed": 7.95}})))
            .unwrap();
        assert_eq!(rendered.kind, "wind_rose");
        assert_eq!(rendered.title, "Wind Rose");
        assert_eq!(rendered.payload["meanSpeed"], json!(7.95));
    }

    #[test]
    fn title_from_artifact() {
        let handler = DescriptorHandler::new("report", "Report");
        let rendered = handler
            .render(&artifact(json!({"kind": "report", "title": "Site A"})))
            .unwrap();
        assert_eq!(rendered.title, "Site A");
        assert!(rendered.payload.is_empty());
    }

    #[test]
    fn required_field_enforced() {
        let handler = DescriptorHandler::new("wind_farm_layout", "Layout").require("turbines");
        let err = handler
            .render(&artifact(json!({"kind": "wind_farm_layout", "payload": {}})))
            .unwrap_err();
        assert_eq!(err, RenderError::MissingField("turbines".to_string()));
    }

    #[test]
    fn non_object_payload_rejected() {
        let handler = DescriptorHandler::new("report", "Report");
        let err = handler
            .render(&artifact(json!({"kind": "report", "payload": "text"})))
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidPayload(_)));
    }

    #[test]
    fn default_kinds() {
        let kinds: Vec<_> = default_handlers().iter().map(|h| h.kind().to_string()).collect();
        assert!(kinds.contains(&"terrain_map".to_string()));
        assert!(kinds.contains(&"wind_rose".to_string()));
        assert!(kinds.contains(&"report".to_string()));
    }
}
