//! Output record handed to external consumers (reporting, plotting).

use crate::grid::GridPoint;
use crate::segment::line_at;

/// Optimal breakpoints in increasing-abscissa order, with their real
/// coordinates and the total approximation error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub breakpoints: Vec<GridPoint>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Total absolute error over all samples.
    pub error: f64,
}

impl Solution {
    /// Breakpoint count.
    #[inline]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Height of the fitted curve at `x`, or `None` outside its span.
    pub fn value_at(&self, x: f64) -> Option<f64> {
        let first = *self.x.first()?;
        let last = *self.x.last()?;
        if x < first || x > last {
            return None;
        }
        // Index of the first breakpoint at or right of x.
        let hi = self.x.partition_point(|&bx| bx < x);
        if hi == 0 {
            return Some(self.y[0]);
        }
        let lo = hi - 1;
        Some(line_at(
            (self.x[lo], self.y[lo]),
            (self.x[hi], self.y[hi]),
            x,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tent() -> Solution {
        Solution {
            breakpoints: vec![
                GridPoint::new(0, 0),
                GridPoint::new(1, 2),
                GridPoint::new(2, 0),
            ],
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0, 0.0],
            error: 0.0,
        }
    }

    #[test]
    fn value_at_breakpoints_and_between() {
        let s = tent();
        assert_eq!(s.value_at(0.0), Some(0.0));
        assert_eq!(s.value_at(1.0), Some(1.0));
        assert_eq!(s.value_at(2.0), Some(0.0));
        assert_eq!(s.value_at(0.5), Some(0.5));
        assert_eq!(s.value_at(1.5), Some(0.5));
    }

    #[test]
    fn value_outside_span_is_none() {
        let s = tent();
        assert_eq!(s.value_at(-0.1), None);
        assert_eq!(s.value_at(2.1), None);
    }
}
