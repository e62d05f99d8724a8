//! Decode diagnostics sink
//!
//! The decoder stays pure; batch callers hand each outcome to an injected
//! [`DecodeSink`] so logging and reporting can be swapped or captured.

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::outcome::{DecodeOutcome, FailureReason};
use crate::raw::RawKind;

/// Per-artifact diagnostic record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeRecord {
    /// Position of the artifact in its batch
    pub index: usize,
    /// Shape of the original raw value
    pub raw_kind: RawKind,
    /// Whether an artifact was recovered
    pub decoded: bool,
    /// Whether the value was benignly empty
    pub skipped: bool,
    /// Failure class, when decoding failed
    pub failure: Option<FailureReason>,
    /// JSON parses performed (zero unless decoding failed)
    pub attempts: u32,
}

impl DecodeRecord {
    /// Build a record for one decoded raw value
    #[must_use]
    pub fn new(index: usize, raw: &Value, outcome: &DecodeOutcome) -> Self {
        let failure = outcome.failure();
        Self {
            index,
            raw_kind: RawKind::of(raw),
            decoded: outcome.is_decoded(),
            skipped: outcome.is_skipped(),
            failure: failure.map(|f| f.reason),
            attempts: failure.map_or(0, |f| f.attempts),
        }
    }
}

/// Receiver of per-artifact decode diagnostics
pub trait DecodeSink: Send + Sync {
    /// Record one outcome
    fn record(&self, record: &DecodeRecord);
}

impl<S: DecodeSink + ?Sized> DecodeSink for &S {
    fn record(&self, record: &DecodeRecord) {
        (**self).record(record);
    }
}

impl<S: DecodeSink + ?Sized> DecodeSink for std::sync::Arc<S> {
    fn record(&self, record: &DecodeRecord) {
        (**self).record(record);
    }
}

/// Sink that emits `tracing` events
///
/// Failures are warnings; decoded and skipped artifacts are debug-level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DecodeSink for TracingSink {
    fn record(&self, record: &DecodeRecord) {
        match record.failure {
            Some(reason) => tracing::warn!(
                index = record.index,
                reason = %reason,
                attempts = record.attempts,
                raw_kind = %record.raw_kind,
                "artifact failed to decode"
            ),
            None if record.skipped => tracing::debug!(
                index = record.index,
                raw_kind = %record.raw_kind,
                "artifact empty, skipped"
            ),
            None => tracing::debug!(
                index = record.index,
                raw_kind = %record.raw_kind,
                "artifact decoded"
            ),
        }
    }
}

/// Sink that keeps every record in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<DecodeRecord>>,
}

impl MemorySink {
    /// Create empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of records, sorted by batch index
    #[must_use]
    pub fn records(&self) -> Vec<DecodeRecord> {
        let mut records = self.records.lock().clone();
        records.sort_by_key(|r| r.index);
        records
    }

    /// Number of failed records
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.failure.is_some())
            .count()
    }

    /// Number of records seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl DecodeSink for MemorySink {
    fn record(&self, record: &DecodeRecord) {
        self.records.lock().push(record.clone());
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DecodeSink for NullSink {
    fn record(&self, _record: &DecodeRecord) {}
}

/// Fan out to two sinks
#[derive(Debug, Clone, Copy)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DecodeSink, B: DecodeSink> DecodeSink for Tee<A, B> {
    fn record(&self, record: &DecodeRecord) {
        self.0.record(record);
        self.1.record(record);
    }
}
