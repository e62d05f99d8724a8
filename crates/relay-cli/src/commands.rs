//! Subcommand implementations
//!
//! Each command writes its report to the given writer and returns whether
//! every artifact made it through, so `main` can pick the exit code.

use std::io::Write;

use relay_artifact::{
    decode_batch, ArtifactDecoder, BatchSummary, DecodeOutcome, MemorySink, Tee, TracingSink,
};
use relay_router::{AgentRouter, ArtifactRouter, RouteMethod};
use serde_json::{json, Value};

use crate::error::CliError;

/// Whether a batch came through intact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Nothing was dropped except empty values
    Clean,
    /// At least one artifact was omitted with a warning
    Degraded,
}

impl CommandStatus {
    /// Process exit code
    #[inline]
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::Degraded => 1,
        }
    }
}

/// Decode a batch and print one line per artifact
///
/// # Errors
/// Returns [`CliError`] if writing the report fails.
pub fn decode<W: Write>(
    decoder: &ArtifactDecoder,
    raws: &[Value],
    as_json: bool,
    out: &mut W,
) -> Result<CommandStatus, CliError> {
    let sink = MemorySink::new();
    let outcomes = decode_batch(decoder, raws, &Tee(&sink, TracingSink));
    let summary = BatchSummary::of(&outcomes);

    if as_json {
        let report = json!({
            "summary": summary,
            "records": sink.records(),
            "outcomes": outcomes,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for (index, outcome) in outcomes.iter().enumerate() {
            match outcome {
                DecodeOutcome::Decoded { artifact } => writeln!(
                    out,
                    "#{index} decoded kind={}",
                    artifact.kind().unwrap_or("-")
                )?,
                DecodeOutcome::Skipped { reason } => writeln!(out, "#{index} skipped {reason}")?,
                DecodeOutcome::Failed(failure) => writeln!(
                    out,
                    "#{index} failed {} attempts={}",
                    failure.reason, failure.attempts
                )?,
            }
        }
        writeln!(
            out,
            "decoded={} skipped={} failed={}",
            summary.decoded, summary.skipped, summary.failed
        )?;
    }

    Ok(if summary.failed == 0 {
        CommandStatus::Clean
    } else {
        CommandStatus::Degraded
    })
}

/// Decode and route a batch, printing rendered artifacts and warnings
///
/// # Errors
/// Returns [`CliError`] if writing the report fails.
pub fn render<W: Write>(
    decoder: &ArtifactDecoder,
    router: &ArtifactRouter,
    raws: &[Value],
    as_json: bool,
    out: &mut W,
) -> Result<CommandStatus, CliError> {
    let outcomes = decode_batch(decoder, raws, &TracingSink);
    let report = router.render_batch(&outcomes);

    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for item in &report.rendered {
            writeln!(
                out,
                "#{} {} \"{}\"",
                item.index, item.rendered.kind, item.rendered.title
            )?;
        }
        for warning in &report.warnings {
            writeln!(out, "warning {warning}")?;
        }
        writeln!(
            out,
            "rendered={} warnings={} skipped={}",
            report.rendered.len(),
            report.warnings.len(),
            report.skipped
        )?;
    }

    Ok(if report.is_clean() {
        CommandStatus::Clean
    } else {
        CommandStatus::Degraded
    })
}

/// Choose an agent for a query and print the decision
///
/// # Errors
/// Returns [`CliError::Agent`] if routing fails, or an output error.
pub fn agent<W: Write>(
    router: &AgentRouter,
    query: &str,
    selection: Option<&str>,
    as_json: bool,
    out: &mut W,
) -> Result<CommandStatus, CliError> {
    let decision = router.route(query, selection)?;

    if as_json {
        writeln!(out, "{}", serde_json::to_string(&decision)?)?;
    } else {
        match &decision.method {
            RouteMethod::Explicit => writeln!(out, "{} (explicit)", decision.agent)?,
            RouteMethod::Pattern { pattern } => {
                writeln!(out, "{} (pattern: {pattern})", decision.agent)?;
            }
            RouteMethod::Fallback => writeln!(out, "{} (fallback)", decision.agent)?,
        }
    }

    Ok(CommandStatus::Clean)
}
