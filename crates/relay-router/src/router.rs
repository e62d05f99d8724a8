//! Artifact router
//!
//! Dispatches decoded artifacts to registered [`RenderHandler`]s by their
//! `kind` discriminator. A bad artifact becomes a per-index warning; the
//! rest of the batch still renders.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use relay_artifact::{Artifact, DecodeFailure, DecodeOutcome};
use serde::Serialize;

use crate::error::RouteFailure;
use crate::handler::{default_handlers, RenderHandler, Rendered};

/// Registry of render handlers keyed by kind
#[derive(Clone, Default)]
pub struct ArtifactRouter {
    handlers: HashMap<String, Arc<dyn RenderHandler>>,
}

impl fmt::Debug for ArtifactRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactRouter")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl ArtifactRouter {
    /// Create empty router
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Router with the built-in descriptor handlers
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut router = Self::new();
        for handler in default_handlers() {
            router.register(handler);
        }
        router
    }

    /// Register a handler, replacing any previous handler for its kind
    pub fn register<H: RenderHandler + 'static>(&mut self, handler: H) {
        self.register_arc(Arc::new(handler));
    }

    /// Register a shared handler
    pub fn register_arc(&mut self, handler: Arc<dyn RenderHandler>) {
        let kind = handler.kind().to_string();
        if self.handlers.insert(kind.clone(), handler).is_some() {
            tracing::debug!(kind = %kind, "replaced render handler");
        }
    }

    /// Check if a kind is routable
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered kinds, sorted
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Number of registered handlers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route one decoded artifact
    ///
    /// # Errors
    /// - [`RouteFailure::MissingKind`] if `kind` is absent or not a string
    /// - [`RouteFailure::UnknownKind`] if no handler is registered
    /// - [`RouteFailure::Render`] if the handler rejects the artifact
    pub fn route(&self, artifact: &Artifact) -> Result<Rendered, RouteFailure> {
        let kind = artifact.kind().ok_or(RouteFailure::MissingKind)?;
        let handler = self
            .handlers
            .get(kind)
            .ok_or_else(|| RouteFailure::UnknownKind(kind.to_string()))?;
        handler
            .render(artifact)
            .map_err(|source| RouteFailure::render(kind, source))
    }

    /// Render a decoded batch
    ///
    /// `Decoded` artifacts are routed in order, `Skipped` ones are omitted
    /// silently, and every `Failed` outcome or routing failure becomes a
    /// warning tagged with its batch index.
    #[must_use]
    pub fn render_batch(&self, outcomes: &[DecodeOutcome]) -> RenderReport {
        let mut report = RenderReport::default();

        for (index, outcome) in outcomes.iter().enumerate() {
            match outcome {
                DecodeOutcome::Decoded { artifact } => match self.route(artifact) {
                    Ok(rendered) => report.rendered.push(IndexedRender { index, rendered }),
                    Err(failure) => {
                        tracing::warn!(index, reason = %failure, "artifact not rendered");
                        let cause = WarningCause::Route { reason: failure };
                        report.warnings.push(ArtifactWarning::new(index, cause));
                    }
                },
                DecodeOutcome::Skipped { .. } => report.skipped += 1,
                DecodeOutcome::Failed(failure) => {
                    tracing::warn!(
                        index,
                        reason = %failure.reason,
                        attempts = failure.attempts,
                        "artifact omitted"
                    );
                    report
                        .warnings
                        .push(ArtifactWarning::new(index, WarningCause::Decode(*failure)));
                }
            }
        }

        tracing::info!(
            rendered = report.rendered.len(),
            warnings = report.warnings.len(),
            skipped = report.skipped,
            "rendered artifact batch"
        );
        report
    }
}

/// A rendered artifact and its batch position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedRender {
    /// Position in the batch
    pub index: usize,
    /// Render descriptor
    #[serde(flatten)]
    pub rendered: Rendered,
}

/// Outcome of rendering one message's artifacts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderReport {
    /// Successfully rendered artifacts, in batch order
    pub rendered: Vec<IndexedRender>,
    /// Omitted artifacts with their reasons, for the developer log
    pub warnings: Vec<ArtifactWarning>,
    /// Empty values omitted without a warning
    pub skipped: usize,
}

impl RenderReport {
    /// Whether every artifact rendered or was benignly empty
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Total outcomes accounted for
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.rendered.len() + self.warnings.len() + self.skipped
    }
}

/// Non-fatal warning about one artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactWarning {
    /// Position in the batch
    pub index: usize,
    /// Classified reason
    pub cause: WarningCause,
}

impl ArtifactWarning {
    fn new(index: usize, cause: WarningCause) -> Self {
        Self { index, cause }
    }

    /// Machine-readable reason code
    #[must_use]
    pub fn reason(&self) -> String {
        match &self.cause {
            WarningCause::Decode(failure) => failure.reason.code(),
            WarningCause::Route { reason } => reason.to_string(),
        }
    }
}

impl fmt::Display for ArtifactWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            WarningCause::Decode(failure) => write!(f, "#{} {}", self.index, failure),
            WarningCause::Route { reason } => write!(f, "#{} {}", self.index, reason),
        }
    }
}

/// Where an artifact was dropped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum WarningCause {
    /// Malformed stored value
    Decode(DecodeFailure),
    /// Decoded but not routable
    Route {
        /// Routing failure
        reason: RouteFailure,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use relay_artifact::{FailureReason, JsonType};
    use serde_json::{json, Value};

    fn decoded(value: Value) -> DecodeOutcome {
        DecodeOutcome::decoded(Artifact::try_from(value).unwrap())
    }

    struct Failing;

    impl RenderHandler for Failing {
        fn kind(&self) -> &str {
            "broken"
        }

        fn render(&self, _artifact: &Artifact) -> Result<Rendered, RenderError> {
            Err(RenderError::InvalidPayload("always".to_string()))
        }
    }

    #[test]
    fn router_new_empty() {
        let router = ArtifactRouter::new();
        assert!(router.is_empty());
        assert_eq!(router.len(), 0);
    }

    #[test]
    fn router_with_defaults() {
        let router = ArtifactRouter::with_defaults();
        assert!(router.contains("terrain_map"));
        assert!(router.contains("wind_rose"));
        assert!(router.contains("report"));
        assert_eq!(router.kinds()[0], "report");
    }

    #[test]
    fn route_known_kind() {
        let router = ArtifactRouter::with_defaults();
        let artifact = Artifact::try_from(json!({"kind": "report"})).unwrap();
        assert_eq!(router.route(&artifact).unwrap().kind, "report");
    }

    #[test]
    fn route_unknown_kind() {
        let router = ArtifactRouter::with_defaults();
        let artifact = Artifact::try_from(json!({"kind": "heatmap"})).unwrap();
        assert_eq!(
            router.route(&artifact).unwrap_err(),
            RouteFailure::UnknownKind("heatmap".to_string())
        );
    }

    #[test]
    fn route_missing_kind() {
        let router = ArtifactRouter::with_defaults();
        for value in [json!({"payload": {}}), json!({"kind": null}), json!({"kind": 3})] {
            let artifact = Artifact::try_from(value).unwrap();
            assert_eq!(router.route(&artifact).unwrap_err(), RouteFailure::MissingKind);
        }
    }

    #[test]
    fn handler_error_wrapped() {
        let mut router = ArtifactRouter::new();
        router.register(Failing);
        let artifact = Artifact::try_from(json!({"kind": "broken"})).unwrap();
        assert!(matches!(
            router.route(&artifact),
            Err(RouteFailure::Render { ref kind, .. }) if kind == "broken"
        ));
    }

    #[test]
    fn register_replaces() {
        let mut router = ArtifactRouter::with_defaults();
        let before = router.len();
        router.register(crate::handler::DescriptorHandler::new("report", "Custom"));
        assert_eq!(router.len(), before);
        let artifact = Artifact::try_from(json!({"kind": "report"})).unwrap();
        assert_eq!(router.route(&artifact).unwrap().title, "Custom");
    }

    #[test]
    fn batch_never_aborts() {
        let router = ArtifactRouter::with_defaults();
        let outcomes = vec![
            decoded(json!({"kind": "wind_rose", "payload": {"meanSpeed": 7.95}})),
            DecodeOutcome::failed(FailureReason::WrongType(JsonType::Number), 0),
            DecodeOutcome::empty(),
            decoded(json!({"kind": "heatmap"})),
            decoded(json!({"kind": "report"})),
        ];

        let report = router.render_batch(&outcomes);

        assert_eq!(report.total(), outcomes.len());
        assert_eq!(report.skipped, 1);
        let rendered: Vec<_> = report.rendered.iter().map(|r| r.index).collect();
        assert_eq!(rendered, vec![0, 4]);
        let reasons: Vec<_> = report.warnings.iter().map(ArtifactWarning::reason).collect();
        assert_eq!(reasons, vec!["wrong_type:number", "unknown_kind:heatmap"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn warning_serializes_with_stage() {
        let warning = ArtifactWarning::new(
            2,
            WarningCause::Route {
                reason: RouteFailure::MissingKind,
            },
        );
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            json!({"index": 2, "cause": {"stage": "route", "reason": "missing_kind"}})
        );

        let warning = ArtifactWarning::new(
            0,
            WarningCause::Decode(DecodeFailure {
                reason: FailureReason::ParseError,
                attempts: 1,
            }),
        );
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            json!({"index": 0, "cause": {"stage": "decode", "reason": "parse_error", "attempts": 1}})
        );
        assert_eq!(warning.to_string(), "#0 parse_error after 1 parse attempt(s)");
    }
}
