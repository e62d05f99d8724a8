//! Testing utilities for the relay workspace
//!
//! Shared fixtures: re-encoded raw values, sample artifacts, and a handler
//! that records what it rendered.

#![allow(missing_docs)]

use parking_lot::Mutex;
use relay_artifact::{Artifact, DecodeOutcome};
use relay_router::{RenderError, RenderHandler, Rendered};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// JSON-encode `value` into a string `times` times
pub fn stringify_n(value: &Value, times: usize) -> Value {
    let mut current = value.clone();
    for _ in 0..times {
        current = Value::String(current.to_string());
    }
    current
}

pub fn wind_rose_value() -> Value {
    json!({"kind": "wind_rose", "payload": {"meanSpeed": 7.95, "directions": 16}})
}

pub fn terrain_map_value() -> Value {
    json!({
        "kind": "terrain_map",
        "title": "Terrain Analysis: 35.067, -101.395",
        "payload": {"center": [35.067, -101.395], "radiusKm": 5, "features": 151}
    })
}

pub fn report_value() -> Value {
    json!({"kind": "report"})
}

pub fn artifact(value: Value) -> Artifact {
    Artifact::try_from(value).unwrap()
}

pub fn decoded(value: Value) -> DecodeOutcome {
    DecodeOutcome::decoded(artifact(value))
}

/// Handler that accepts any payload and remembers each render
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    kind: String,
    seen: Arc<Mutex<Vec<Map<String, Value>>>>,
}

impl RecordingHandler {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Vec<Map<String, Value>> {
        self.seen.lock().clone()
    }
}

impl RenderHandler for RecordingHandler {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn render(&self, artifact: &Artifact) -> Result<Rendered, RenderError> {
        self.seen.lock().push(artifact.as_map().clone());
        Ok(Rendered {
            kind: self.kind.clone(),
            title: self.kind.clone(),
            payload: artifact.payload().cloned().unwrap_or_default(),
        })
    }
}
