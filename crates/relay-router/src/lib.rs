//! Relay Router
//!
//! Dispatch for decoded chat artifacts and incoming chat queries.
//!
//! # Architecture
//!
//! ```text
//! DecodeOutcome[] → ArtifactRouter → RenderHandler (by kind) → RenderReport
//!                         └── Failed / unknown kind → ArtifactWarning
//!
//! query (+ selection) → AgentRouter → AgentDecision
//! ```
//!
//! # Example
//!
//! ```rust
//! use relay_artifact::ArtifactDecoder;
//! use relay_router::ArtifactRouter;
//!
//! let decoder = ArtifactDecoder::new();
//! let outcomes = vec![
//!     decoder.decode_str(r#"{"kind":"wind_rose","payload":{"meanSpeed":7.95}}"#),
//!     decoder.decode_str("not json"),
//! ];
//!
//! let report = ArtifactRouter::with_defaults().render_batch(&outcomes);
//! assert_eq!(report.rendered.len(), 1);
//! assert_eq!(report.warnings[0].reason(), "parse_error");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod agent;
pub mod error;
pub mod handler;
pub mod router;

// Re-exports for convenience
pub use agent::{AgentDecision, AgentRoute, AgentRouter, RouteMethod, AUTO_SELECTION, DEFAULT_AGENT};
pub use error::{AgentRouteError, RenderError, RouteFailure};
pub use handler::{default_handlers, DescriptorHandler, RenderHandler, Rendered};
pub use router::{ArtifactRouter, ArtifactWarning, IndexedRender, RenderReport, WarningCause};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for decoding and routing artifacts
    pub use crate::agent::{AgentDecision, AgentRouter};
    pub use crate::handler::{RenderHandler, Rendered};
    pub use crate::router::{ArtifactRouter, RenderReport};
    pub use relay_artifact::{Artifact, ArtifactDecoder, DecodeOutcome, DecodeSink};
}
