//! Errors raised while turning run records into latency summaries.

use std::fmt;
use thiserror::Error;

/// A broken cross-series invariant inside one run record.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// `latencies` and `draw_latencies` have different lengths.
    LengthMismatch {
        latencies: usize,
        draw_latencies: usize,
    },
    /// A draw call took at least as long as the frame containing it.
    DrawExceedsLatency {
        index: usize,
        latency: f64,
        draw_latency: f64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::LengthMismatch {
                latencies,
                draw_latencies,
            } => write!(
                f,
                "{latencies} latencies but {draw_latencies} draw latencies"
            ),
            Violation::DrawExceedsLatency {
                index,
                latency,
                draw_latency,
            } => write!(
                f,
                "draw latency {draw_latency} ms is not below frame latency {latency} ms at index {index}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummaryError {
    #[error("cannot summarize an empty sample sequence")]
    EmptyInput,

    #[error("need at least 2 samples for a standard error, got {count}")]
    DegenerateSample { count: usize },

    #[error("quantile fraction {0} is outside [0, 1]")]
    FractionOutOfRange(f64),

    #[error("invariant violated: {0}")]
    InvariantViolation(Violation),

    #[error("mean frame latency is zero; every frame is unmeasured")]
    ZeroMeanLatency,

    #[error("malformed run record {origin}: {reason}")]
    MalformedRecord { origin: String, reason: String },

    #[error("run record {name}: {source}")]
    Record {
        name: String,
        #[source]
        source: Box<SummaryError>,
    },
}

impl SummaryError {
    /// Attach the identifier of the run record being processed.
    pub fn in_record(self, name: &str) -> Self {
        SummaryError::Record {
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying error, with any per-record context stripped.
    pub fn root(&self) -> &SummaryError {
        match self {
            SummaryError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SummaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message_names_index_and_values() {
        let err = SummaryError::InvariantViolation(Violation::DrawExceedsLatency {
            index: 0,
            latency: 5.0,
            draw_latency: 6.0,
        });
        let msg = err.to_string();
        assert!(msg.contains("index 0"));
        assert!(msg.contains("6 ms"));
        assert!(msg.contains("5 ms"));
    }

    #[test]
    fn test_record_context_wraps_and_unwraps() {
        let err = SummaryError::DegenerateSample { count: 1 }.in_record("bench1.json");
        assert_eq!(
            err.to_string(),
            "run record bench1.json: need at least 2 samples for a standard error, got 1"
        );
        assert_eq!(err.root(), &SummaryError::DegenerateSample { count: 1 });
    }
}
