//! Least-squares line used as a comparison baseline.
//!
//! The fitted line is scored with the same piece-error rule as the engines,
//! over the full grid span, so its error is directly comparable with a
//! two-breakpoint curve. It is not an optimizer for the grid problem.

use crate::error::{PwlError, Result};
use crate::instance::PwlInstance;
use crate::segment::segment_error;

/// Ordinary least-squares fit `y = slope * x + intercept` and its error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegressionBaseline {
    pub slope: f64,
    pub intercept: f64,
    /// Total absolute error of the line across the grid span.
    pub error: f64,
}

impl RegressionBaseline {
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through every sample and score it.
pub fn linear_baseline(instance: &PwlInstance) -> Result<RegressionBaseline> {
    let samples = instance.samples();
    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|s| s.x).sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.y).sum::<f64>() / n;

    let (sxy, sxx) = samples.iter().fold((0.0, 0.0), |(sxy, sxx), s| {
        let dx = s.x - mean_x;
        (sxy + dx * (s.y - mean_y), sxx + dx * dx)
    });
    if sxx == 0.0 {
        return Err(PwlError::InvalidInput(
            "regression needs at least two distinct x values".into(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let fit = RegressionBaseline {
        slope,
        intercept,
        error: 0.0,
    };

    let xs = instance.grid().xs();
    let (first, last) = (samples[0], samples[samples.len() - 1]);
    let from = (xs[0], fit.predict(first.x));
    let to = (xs[xs.len() - 1], fit.predict(last.x));
    let error = segment_error(samples, xs[0], from, to);

    #[cfg(feature = "tracing")]
    tracing::debug!(slope, intercept, error, "linear baseline fitted");

    Ok(RegressionBaseline { error, ..fit })
}
