//! Aggregation of run records into per-benchmark latency summaries.

mod latency;

use crate::error::{Result, SummaryError};
use crate::metrics::DistributionSummary;
use crate::model::{
    AggregateConfig, Aggregation, BenchSummary, FailurePolicy, OutputMode, RunRecord, SeriesStats,
    SkippedRecord,
};
use crate::stats::{SingleSamplePolicy, UncertainValue};
use latency::extract_latencies;
use tracing::{debug, info, warn};

/// Summarize every record in `runs`.
///
/// Records are processed one at a time in the given order. Structured output
/// is then sorted by name; text and definitions keep input order. Under
/// [`FailurePolicy::Abort`] the first failing record ends the run with an
/// error naming it; under [`FailurePolicy::Skip`] it is logged and reported
/// in [`Aggregation::skipped`].
pub fn aggregate(runs: &[RunRecord], cfg: &AggregateConfig) -> Result<Aggregation> {
    let mut out = Aggregation::default();

    for run in runs {
        match summarize_run(run, cfg) {
            Ok(summary) => out.records.push(summary),
            Err(e) => {
                let e = e.in_record(&run.source_name);
                match cfg.on_error {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Skip => {
                        warn!(record = %run.source_name, error = %e, "skipping run record");
                        out.skipped.push(SkippedRecord {
                            source_name: run.source_name.clone(),
                            error: e,
                        });
                    }
                }
            }
        }
    }

    if cfg.mode == OutputMode::Structured {
        out.records.sort_by(|a, b| a.name.cmp(&b.name));
    }

    info!(
        summarized = out.records.len(),
        skipped = out.skipped.len(),
        "aggregation finished"
    );
    Ok(out)
}

fn summarize_run(run: &RunRecord, cfg: &AggregateConfig) -> Result<BenchSummary> {
    let name = run.display_name()?;
    let series = extract_latencies(run, cfg.skip_warmup)?;
    let with_distribution = cfg.with_distribution || cfg.mode == OutputMode::Structured;

    let latency = series_stats(&series.latencies, cfg.single_sample, with_distribution)?;
    // Only all-0/0 frames can reach here with a zero mean; no fraction or fps exists.
    if latency.estimate.value == 0.0 {
        return Err(SummaryError::ZeroMeanLatency);
    }
    let draw_latency = series_stats(&series.draw_latencies, cfg.single_sample, with_distribution)?;
    let draw_fraction = draw_latency.estimate.ratio(&latency.estimate);

    let frame_ms = series.frame_ms();
    debug!(
        record = %run.source_name,
        samples = series.latencies.len(),
        mean_latency_ms = latency.estimate.value,
        frame_ms = ?frame_ms,
        "summarized run"
    );

    Ok(BenchSummary {
        name,
        source_name: run.source_name.clone(),
        latency,
        draw_latency,
        draw_fraction,
        frame_ms,
    })
}

fn series_stats(
    samples: &[f64],
    policy: SingleSamplePolicy,
    with_distribution: bool,
) -> Result<SeriesStats> {
    let estimate = UncertainValue::from_samples_with(samples, policy)?;
    let distribution = if with_distribution {
        Some(DistributionSummary::from_samples_with(samples, policy)?)
    } else {
        None
    };
    Ok(SeriesStats {
        estimate,
        distribution,
    })
}
