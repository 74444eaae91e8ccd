use crate::error::{Result, SummaryError, Violation};
use crate::model::RunRecord;

/// Validated, flattened samples of one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct LatencySeries {
    pub latencies: Vec<f64>,
    pub draw_latencies: Vec<f64>,
    pub elapsed_ms: f64,
    pub frame_count: u64,
}

impl LatencySeries {
    /// Mean frame time from the interval totals, independent of the samples.
    pub fn frame_ms(&self) -> Option<f64> {
        (self.frame_count > 0).then(|| self.elapsed_ms / self.frame_count as f64)
    }
}

/// Concatenate the samples of `record`, optionally dropping the warm-up
/// (first) message, and check that every draw call fits in its frame.
pub(crate) fn extract_latencies(record: &RunRecord, skip_warmup: bool) -> Result<LatencySeries> {
    let used = if skip_warmup {
        record.messages.get(1..).unwrap_or_default()
    } else {
        &record.messages[..]
    };

    let mut series = LatencySeries::default();
    for msg in used {
        series.latencies.extend_from_slice(&msg.latencies);
        series.draw_latencies.extend_from_slice(&msg.draw_latencies);
        series.elapsed_ms += msg.elapsed_ms;
        series.frame_count += msg.frame_count;
    }

    validate(&series.latencies, &series.draw_latencies)?;
    Ok(series)
}

fn validate(latencies: &[f64], draw_latencies: &[f64]) -> Result<()> {
    if latencies.len() != draw_latencies.len() {
        return Err(SummaryError::InvariantViolation(Violation::LengthMismatch {
            latencies: latencies.len(),
            draw_latencies: draw_latencies.len(),
        }));
    }

    let bad = latencies
        .iter()
        .zip(draw_latencies)
        .position(|(&latency, &draw)| !(draw < latency || (draw == 0.0 && latency == 0.0)));
    match bad {
        Some(index) => Err(SummaryError::InvariantViolation(
            Violation::DrawExceedsLatency {
                index,
                latency: latencies[index],
                draw_latency: draw_latencies[index],
            },
        )),
        None => Ok(()),
    }
}
