//! Frame-latency summaries for instrumented benchmark runs.
//!
//! Each run record holds the per-frame and per-draw-call latencies reported
//! by the instrumented client. [`engine::aggregate`] validates and flattens
//! them, then reports the mean with its standard error and, for structured
//! output, the full distribution of every series.

pub mod cli;
pub mod engine;
pub mod error;
pub mod knob;
pub mod metrics;
pub mod model;
pub mod stats;
pub mod storage;
pub mod subset;
mod text_summary;

pub use engine::aggregate;
pub use error::{SummaryError, Violation};
pub use metrics::DistributionSummary;
pub use model::{AggregateConfig, BenchSummary, FailurePolicy, OutputMode, RunRecord};
pub use stats::{quantile, SingleSamplePolicy, UncertainValue};
