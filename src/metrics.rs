use crate::error::Result;
use crate::stats::{mean_and_stdev, quantile, SingleSamplePolicy};
use serde::{Deserialize, Serialize};

/// Full distribution of one latency series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    pub stdev: f64,
    /// Standard error of the mean.
    pub error: f64,
    pub stdev_min: f64,
    pub stdev_max: f64,
    pub err_min: f64,
    pub err_max: f64,
    pub q50: f64,
    pub q90: f64,
    pub q95: f64,
    pub q99: f64,
    /// Grouped median with unit-width classes.
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl DistributionSummary {
    /// Summarize `samples` (any order). Fails on fewer than two samples.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        Self::from_samples_with(samples, SingleSamplePolicy::Reject)
    }

    pub fn from_samples_with(samples: &[f64], policy: SingleSamplePolicy) -> Result<Self> {
        let (mean, stdev) = mean_and_stdev(samples, policy)?;
        let count = samples.len();
        let error = stdev / (count as f64).sqrt();

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Ok(Self {
            count,
            mean,
            stdev,
            error,
            stdev_min: mean - stdev,
            stdev_max: mean + stdev,
            err_min: mean - error,
            err_max: mean + error,
            q50: quantile(&sorted, 0.50)?,
            q90: quantile(&sorted, 0.90)?,
            q95: quantile(&sorted, 0.95)?,
            q99: quantile(&sorted, 0.99)?,
            median: grouped_median(&sorted),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

/// Median of continuous data grouped into unit-width classes centred on the
/// observed values, interpolated within the median class:
/// `L + (n/2 - cf) / f`, where `L` is the class lower bound, `cf` the count
/// below the class and `f` the count inside it.
///
/// `sorted` must be non-empty and ascending.
fn grouped_median(sorted: &[f64]) -> f64 {
    const INTERVAL: f64 = 1.0;

    let n = sorted.len();
    let x = sorted[n / 2];
    let below = sorted.partition_point(|&v| v < x);
    let through = sorted.partition_point(|&v| v <= x);
    let frequency = (through - below) as f64;

    let lower_bound = x - INTERVAL / 2.0;
    lower_bound + INTERVAL * (n as f64 / 2.0 - below as f64) / frequency
}
