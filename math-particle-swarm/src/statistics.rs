//! Summary statistics over the final fitness of repeated runs.

use crate::error::{PSOError, Result};
use crate::numeric::newton_sqrt;

/// Mean, spread and best of a set of run results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of runs summarised.
    pub runs: usize,
    /// Lowest final fitness.
    pub best: f64,
    /// Arithmetic mean of the final fitness values.
    pub mean: f64,
    /// Population standard deviation around `mean`.
    pub stddev: f64,
}

/// Arithmetic mean. `values` must not be empty.
pub fn mean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}

/// Population standard deviation `sqrt(sum((v - mean)^2) / n)`.
///
/// The root goes through [`newton_sqrt`], so the result carries its `1e-5`
/// tolerance on the variance. `values` must not be empty.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    newton_sqrt(sum_sq / values.len() as f64)
}

/// Mean, standard deviation and best value of `values`.
///
/// # Errors
///
/// Returns `PSOError::EmptySample` if `values` is empty.
pub fn summarize(values: &[f64]) -> Result<RunSummary> {
    if values.is_empty() {
        return Err(PSOError::EmptySample);
    }
    let m = mean(values);
    let best = values.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(RunSummary {
        runs: values.len(),
        best,
        mean: m,
        stddev: stddev(values, m),
    })
}
