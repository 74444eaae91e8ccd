use crate::error::{Result, SummaryError};
use crate::metrics::DistributionSummary;
use crate::stats::{SingleSamplePolicy, UncertainValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One benchmark execution as dumped by the instrumented client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(rename = "fn")]
    pub source_name: String,
    pub messages: Vec<Message>,
}

/// One reporting interval within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    #[serde(rename = "frames")]
    pub frame_count: u64,
    pub latencies: Vec<f64>,
    pub draw_latencies: Vec<f64>,
}

impl RunRecord {
    /// Convert a parsed JSON document; `origin` names it in error messages.
    pub fn from_value(value: serde_json::Value, origin: &str) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| SummaryError::MalformedRecord {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Benchmark name: `source_name` without directories or extension.
    pub fn display_name(&self) -> Result<String> {
        Path::new(&self.source_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| SummaryError::MalformedRecord {
                origin: self.source_name.clone(),
                reason: "source name has no file component".to_string(),
            })
    }
}

/// Output rendering selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text lines per record, in input order.
    Text,
    /// Record list with full distributions, sorted by name.
    Structured,
    /// `data-<name>-*` definitions, in input order.
    Definitions,
}

/// What the aggregator does when one run record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Stop at the first failing record.
    Abort,
    /// Log the failure, leave the record out and keep going.
    Skip,
}

#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub skip_warmup: bool,
    pub mode: OutputMode,
    /// Attach distribution summaries outside structured mode too, e.g. for
    /// a structured export alongside text output.
    pub with_distribution: bool,
    pub on_error: FailurePolicy,
    pub single_sample: SingleSamplePolicy,
}

/// Statistics for one latency series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    #[serde(flatten)]
    pub estimate: UncertainValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSummary>,
}

/// Aggregated result for one run record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSummary {
    pub name: String,
    #[serde(skip)]
    pub source_name: String,
    pub latency: SeriesStats,
    pub draw_latency: SeriesStats,
    /// Share of frame latency spent in draw calls.
    pub draw_fraction: UncertainValue,
    /// Elapsed time over frame count; absent when no frames were reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_ms: Option<f64>,
}

/// A record left out under [`FailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub source_name: String,
    pub error: SummaryError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    pub records: Vec<BenchSummary>,
    pub skipped: Vec<SkippedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_run_record() {
        let value = json!({
            "fn": "collected/bench1.json",
            "messages": [
                {"ms": 20.5, "frames": 2, "latencies": [10.0, 10.5], "draw_latencies": [2, 2.5]}
            ]
        });
        let record = RunRecord::from_value(value, "bench1.json").unwrap();
        assert_eq!(record.source_name, "collected/bench1.json");
        assert_eq!(record.messages.len(), 1);
        assert_eq!(record.messages[0].frame_count, 2);
        assert_eq!(record.messages[0].draw_latencies, vec![2.0, 2.5]);
        assert_eq!(record.display_name().unwrap(), "bench1");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let value = json!({
            "fn": "bench1.json",
            "messages": [{"ms": 20.0, "frames": 2, "latencies": [10.0, 10.0]}]
        });
        let err = RunRecord::from_value(value, "bench1.json").unwrap_err();
        match err {
            SummaryError::MalformedRecord { origin, reason } => {
                assert_eq!(origin, "bench1.json");
                assert!(reason.contains("draw_latencies"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let value = json!({"fn": "b.json", "messages": "nope"});
        assert!(matches!(
            RunRecord::from_value(value, "b.json"),
            Err(SummaryError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_display_name_strips_path_and_extension() {
        let record = RunRecord {
            source_name: "runs/2017/scene.tiny.json".to_string(),
            messages: vec![],
        };
        assert_eq!(record.display_name().unwrap(), "scene.tiny");

        let record = RunRecord {
            source_name: String::new(),
            messages: vec![],
        };
        assert!(record.display_name().is_err());
    }

    #[test]
    fn test_series_stats_serializes_flat_estimate() {
        let stats = SeriesStats {
            estimate: UncertainValue::new(10.0, 2.0),
            distribution: None,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            value,
            json!({"value": 10.0, "error": 2.0, "err_min": 8.0, "err_max": 12.0})
        );
    }
}
