use super::{mean_and_stdev, SingleSamplePolicy};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// An estimate paired with its standard error.
///
/// Errors of independent operands combine in quadrature. Equality is exact on
/// both fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "EstimateRepr", from = "EstimateRepr")]
pub struct UncertainValue {
    pub value: f64,
    pub error: f64,
}

impl UncertainValue {
    pub const fn new(value: f64, error: f64) -> Self {
        Self { value, error }
    }

    /// An exact value with no error.
    pub const fn exact(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Mean of `samples` with the standard error of the mean (`stdev / sqrt(n)`).
    ///
    /// Fewer than two samples is an error; see [`Self::from_samples_with`] to
    /// accept a single sample with zero error.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        Self::from_samples_with(samples, SingleSamplePolicy::Reject)
    }

    pub fn from_samples_with(samples: &[f64], policy: SingleSamplePolicy) -> Result<Self> {
        let (mean, stdev) = mean_and_stdev(samples, policy)?;
        Ok(Self::new(mean, stdev / (samples.len() as f64).sqrt()))
    }

    pub fn err_min(&self) -> f64 {
        self.value - self.error
    }

    pub fn err_max(&self) -> f64 {
        self.value + self.error
    }

    pub fn relative_error(&self) -> f64 {
        (self.error / self.value).abs()
    }

    /// `self / denominator`, treating the operands as independent.
    ///
    /// Relative errors add in quadrature. The result is written in absolute
    /// form so a zero numerator still yields a finite error.
    pub fn ratio(&self, denominator: &UncertainValue) -> UncertainValue {
        let a = self.value;
        let b = denominator.value;
        let error = (self.error / b).hypot(a * denominator.error / (b * b));
        UncertainValue::new(a / b, error)
    }
}

impl Add for UncertainValue {
    type Output = UncertainValue;

    fn add(self, rhs: UncertainValue) -> UncertainValue {
        UncertainValue::new(self.value + rhs.value, self.error.hypot(rhs.error))
    }
}

impl Sub for UncertainValue {
    type Output = UncertainValue;

    fn sub(self, rhs: UncertainValue) -> UncertainValue {
        UncertainValue::new(self.value - rhs.value, self.error.hypot(rhs.error))
    }
}

/// Scaling by an exact constant.
impl Mul<f64> for UncertainValue {
    type Output = UncertainValue;

    fn mul(self, k: f64) -> UncertainValue {
        UncertainValue::new(self.value * k, self.error * k.abs())
    }
}

impl fmt::Display for UncertainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} ± {:.*}", p, self.value, p, self.error),
            None => write!(f, "{} ± {}", self.value, self.error),
        }
    }
}

/// Wire shape: the pair plus its precomputed bounds, for plotting error bars.
#[derive(Serialize, Deserialize)]
struct EstimateRepr {
    value: f64,
    error: f64,
    #[serde(default)]
    err_min: f64,
    #[serde(default)]
    err_max: f64,
}

impl From<UncertainValue> for EstimateRepr {
    fn from(v: UncertainValue) -> Self {
        EstimateRepr {
            value: v.value,
            error: v.error,
            err_min: v.err_min(),
            err_max: v.err_max(),
        }
    }
}

impl From<EstimateRepr> for UncertainValue {
    fn from(r: EstimateRepr) -> Self {
        UncertainValue::new(r.value, r.error)
    }
}
