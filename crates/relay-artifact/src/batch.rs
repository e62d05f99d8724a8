//! Batch decoding
//!
//! Decoding artifact *i* never depends on artifact *j*, so a batch may be
//! decoded sequentially or with rayon; both yield outcomes in input order.

use rayon::prelude::*;
use serde_json::Value;

use crate::decoder::ArtifactDecoder;
use crate::outcome::DecodeOutcome;
use crate::sink::{DecodeRecord, DecodeSink};

/// Decode a batch in order, reporting each outcome to `sink`
pub fn decode_batch<S>(decoder: &ArtifactDecoder, raws: &[Value], sink: &S) -> Vec<DecodeOutcome>
where
    S: DecodeSink + ?Sized,
{
    raws.iter()
        .enumerate()
        .map(|(index, raw)| decode_one(decoder, index, raw, sink))
        .collect()
}

/// Decode a batch on the rayon pool
///
/// Sink calls may arrive in any order; the returned outcomes do not.
pub fn decode_batch_par<S>(
    decoder: &ArtifactDecoder,
    raws: &[Value],
    sink: &S,
) -> Vec<DecodeOutcome>
where
    S: DecodeSink + ?Sized,
{
    raws.par_iter()
        .enumerate()
        .map(|(index, raw)| decode_one(decoder, index, raw, sink))
        .collect()
}

fn decode_one<S>(decoder: &ArtifactDecoder, index: usize, raw: &Value, sink: &S) -> DecodeOutcome
where
    S: DecodeSink + ?Sized,
{
    let outcome = decoder.decode(raw);
    sink.record(&DecodeRecord::new(index, raw, &outcome));
    outcome
}

/// Counts over a decoded batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    /// Artifacts recovered
    pub decoded: usize,
    /// Empty values omitted
    pub skipped: usize,
    /// Malformed values
    pub failed: usize,
}

impl BatchSummary {
    /// Tally a batch of outcomes
    #[must_use]
    pub fn of(outcomes: &[DecodeOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut acc, outcome| {
            match outcome {
                DecodeOutcome::Decoded { .. } => acc.decoded += 1,
                DecodeOutcome::Skipped { .. } => acc.skipped += 1,
                DecodeOutcome::Failed(_) => acc.failed += 1,
            }
            acc
        })
    }

    /// Total number of outcomes
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.decoded + self.skipped + self.failed
    }
}
