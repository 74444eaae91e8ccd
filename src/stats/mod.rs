//! Numeric building blocks: interpolated quantiles and values with standard errors.

pub mod quantile;
pub mod uncertain;

pub use quantile::quantile;
pub use uncertain::UncertainValue;

use crate::error::{Result, SummaryError};

/// What to do when a sample sequence holds exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SingleSamplePolicy {
    /// Fail with `DegenerateSample`; the spread of one point is undefined.
    Reject,
    /// Report zero standard deviation and zero standard error.
    ZeroError,
}

/// Arithmetic mean and sample standard deviation (n - 1 denominator).
pub(crate) fn mean_and_stdev(samples: &[f64], policy: SingleSamplePolicy) -> Result<(f64, f64)> {
    let n = samples.len();
    match (n, policy) {
        (0, _) => return Err(SummaryError::EmptyInput),
        (1, SingleSamplePolicy::Reject) => {
            return Err(SummaryError::DegenerateSample { count: 1 })
        }
        (1, SingleSamplePolicy::ZeroError) => return Ok((samples[0], 0.0)),
        _ => {}
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let squared_diffs: f64 = samples.iter().map(|&x| (x - mean).powi(2)).sum();
    Ok((mean, (squared_diffs / (n - 1) as f64).sqrt()))
}
