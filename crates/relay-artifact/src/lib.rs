//! Relay Artifact System
//!
//! Recovery of chat artifacts from schema-less JSON storage fields.
//!
//! # Core Concepts
//!
//! - [`Artifact`]: a decoded JSON object with a `kind` discriminator
//! - [`ArtifactDecoder`]: bounded unwrapping of re-encoded string layers
//! - [`DecodeOutcome`]: `Decoded | Skipped | Failed`, never an error
//! - [`DecodeSink`]: injected receiver of per-artifact diagnostics
//!
//! # Example
//!
//! ```rust
//! use relay_artifact::{ArtifactDecoder, DecodeOutcome};
//!
//! let decoder = ArtifactDecoder::new();
//! let outcome = decoder.decode_str(r#""{\"kind\":\"report\"}""#);
//! assert_eq!(outcome.artifact().and_then(|a| a.kind()), Some("report"));
//!
//! assert_eq!(decoder.decode_str("   "), DecodeOutcome::empty());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod artifact;
mod batch;
mod decoder;
mod error;
mod outcome;
mod raw;
mod sink;

// Re-exports
pub use artifact::{Artifact, NotAnObject, KIND_KEY, PAYLOAD_KEY};
pub use batch::{decode_batch, decode_batch_par, BatchSummary};
pub use decoder::{ArtifactDecoder, DecoderConfig, DEFAULT_MAX_REENCODE_DEPTH};
pub use error::ConfigError;
pub use outcome::{DecodeFailure, DecodeOutcome, FailureReason, SkipReason};
pub use raw::{JsonType, RawKind};
pub use sink::{DecodeRecord, DecodeSink, MemorySink, NullSink, Tee, TracingSink};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_then_redecode_is_passthrough() {
        let decoder = ArtifactDecoder::new();
        let first = decoder.decode_str(r#"{"kind":"terrain_map","payload":{"zoom":12}}"#);
        let artifact = first.clone().into_artifact().unwrap();

        let again = decoder.decode(&artifact.clone().into_value());
        assert_eq!(again, first);

        let payload = json!(artifact.payload().unwrap());
        assert_eq!(
            decoder.decode(&payload).into_artifact().map(Artifact::into_value),
            Some(payload)
        );
    }

    #[test]
    fn batch_feeds_sink_with_reasons() {
        let sink = MemorySink::new();
        let raws = vec![json!(null), json!(3), json!("  ")];
        let outcomes = decode_batch(&ArtifactDecoder::new(), &raws, &sink);

        assert_eq!(BatchSummary::of(&outcomes).failed, 2);
        let reasons: Vec<_> = sink
            .records()
            .into_iter()
            .map(|r| r.failure.map(|f| f.code()))
            .collect();
        assert_eq!(
            reasons,
            vec![Some("null".to_string()), Some("wrong_type:number".to_string()), None]
        );
    }
}
