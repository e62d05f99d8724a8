//! Error types for routing
//!
//! Provides per-artifact failures for:
//! - Artifacts that cannot be routed (missing or unknown `kind`)
//! - Handlers that reject an artifact's payload
//! - Agent selection

use serde::{Serialize, Serializer};

/// Handler-level render error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A required payload key is absent
    #[error("missing payload field: {0}")]
    MissingField(String),

    /// The payload is present but unusable
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Why a decoded artifact was not rendered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteFailure {
    /// No string `kind` discriminator
    #[error("missing_kind")]
    MissingKind,

    /// `kind` has no registered handler
    #[error("unknown_kind:{0}")]
    UnknownKind(String),

    /// The handler rejected the artifact
    #[error("render_failed:{kind}: {source}")]
    Render {
        /// Kind whose handler failed
        kind: String,
        /// Handler error
        #[source]
        source: RenderError,
    },
}

impl RouteFailure {
    /// Wrap a handler error
    pub fn render(kind: impl Into<String>, source: RenderError) -> Self {
        Self::Render {
            kind: kind.into(),
            source,
        }
    }
}

impl Serialize for RouteFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors selecting an agent for a query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentRouteError {
    /// Explicit selection names an agent that is not registered
    #[error("unknown agent: '{0}'")]
    UnknownAgent(String),

    /// Nothing to match against
    #[error("empty query")]
    EmptyQuery,

    /// A route pattern did not compile
    #[error("invalid pattern for agent '{agent}': {message}")]
    InvalidPattern {
        /// Agent the pattern belongs to
        agent: String,
        /// Regex compiler message
        message: String,
    },
}
