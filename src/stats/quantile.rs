//! Linear-interpolated quantiles (Hyndman & Fan type 7, the default in R and NumPy).
//!
//! For a sorted sample `x` of size `n` and fraction `p`:
//! ```text
//! k = (n - 1) * p
//! q = x[floor(k)] + (k - floor(k)) * (x[ceil(k)] - x[floor(k)])
//! ```

use crate::error::{Result, SummaryError};

/// Compute the quantile at `fraction` of an ascending-sorted slice.
///
/// Fails with `EmptyInput` on an empty slice and `FractionOutOfRange` when
/// `fraction` is not in `[0, 1]`.
pub fn quantile(sorted: &[f64], fraction: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(SummaryError::EmptyInput);
    }
    if !(0.0..=1.0).contains(&fraction) {
        return Err(SummaryError::FractionOutOfRange(fraction));
    }
    debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]), "input must be sorted");

    let rank = (sorted.len() - 1) as f64 * fraction;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        return Ok(sorted[lower_index]);
    }
    let lower_value = sorted[lower_index];
    let upper_value = sorted[upper_index];
    Ok(lower_value + (rank - lower_index as f64) * (upper_value - lower_value))
}
