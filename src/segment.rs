//! Approximation error of a single piece.
//!
//! A piece is the segment between two breakpoints. Its error is the sum of
//! absolute vertical deviations of the samples inside the piece's x-range
//! `(from.x, to.x]`. The leftmost piece of a curve (starting on the first grid
//! column) also charges the very first sample, which the open lower bound
//! would otherwise drop.
//!
//! Samples must be sorted by x; each evaluation is a single forward scan that
//! stops at the first sample past `to.x`.

use crate::grid::{GridPoint, Sample};
use crate::instance::PwlInstance;
use crate::traits::SegmentCost;

/// Height of the line through `from` and `to` at abscissa `x`.
#[inline]
pub fn line_at(from: (f64, f64), to: (f64, f64), x: f64) -> f64 {
    (to.1 - from.1) / (to.0 - from.0) * (x - from.0) + from.1
}

/// Total absolute deviation of `samples` from the segment `from -> to`.
///
/// `left_edge` is the first grid abscissa; a segment starting there also
/// includes `samples[0]`.
///
/// # Panics
/// Panics if `from.0 >= to.0`: a vertical or reversed piece has no slope.
pub fn segment_error(samples: &[Sample], left_edge: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    assert!(
        from.0 < to.0,
        "segment endpoints must have increasing abscissas ({} >= {})",
        from.0,
        to.0
    );

    let mut err = 0.0;
    if from.0 == left_edge {
        if let Some(first) = samples.first() {
            err += (first.y - line_at(from, to, first.x)).abs();
        }
    }

    samples
        .iter()
        .take_while(|s| s.x <= to.0)
        .filter(|s| from.0 < s.x)
        .fold(err, |acc, s| acc + (s.y - line_at(from, to, s.x)).abs())
}

/// Uncached evaluation path: every request scans the samples again.
#[derive(Debug)]
pub struct DirectCost<'a> {
    instance: &'a PwlInstance,
    evaluations: usize,
}

impl<'a> DirectCost<'a> {
    pub fn new(instance: &'a PwlInstance) -> Self {
        Self {
            instance,
            evaluations: 0,
        }
    }

    /// Number of sample scans performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

impl SegmentCost for DirectCost<'_> {
    fn cost(&mut self, from: GridPoint, to: GridPoint) -> f64 {
        self.evaluations += 1;
        self.instance.segment_error(from, to)
    }

    fn recall(&self, from: GridPoint, to: GridPoint) -> Option<f64> {
        Some(self.instance.segment_error(from, to))
    }
}
