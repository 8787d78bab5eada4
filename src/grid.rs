//! The discretized coordinate space candidate breakpoints are drawn from.
//!
//! A [`Grid`] holds `m1` abscissas and `m2` ordinates, each linearly spaced
//! between the min and max of the sample data. Breakpoints are addressed by
//! [`GridPoint`] index pairs; real coordinates are looked up on demand.

use crate::error::{PwlError, Result};
use crate::utils::linspace;

/// One input observation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Candidate breakpoint location: column `i` in `[0, m1)`, row `j` in `[0, m2)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// Abscissa index.
    pub i: usize,
    /// Ordinate index.
    pub j: usize,
}

impl GridPoint {
    #[inline]
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl From<(usize, usize)> for GridPoint {
    fn from((i, j): (usize, usize)) -> Self {
        Self { i, j }
    }
}

/// Immutable grid of candidate abscissas and ordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    /// Build an `m1 x m2` grid spanning the sample range.
    ///
    /// Samples are expected to be validated already (non-empty, finite).
    pub fn from_samples(samples: &[Sample], m1: usize, m2: usize) -> Result<Self> {
        if samples.is_empty() {
            return Err(PwlError::InvalidInput("sample set is empty".into()));
        }
        let (x_lo, x_hi) = min_max(samples.iter().map(|s| s.x));
        let (y_lo, y_hi) = min_max(samples.iter().map(|s| s.y));
        Self::new(linspace(x_lo, x_hi, m1), linspace(y_lo, y_hi, m2))
    }

    /// Build a grid from explicit coordinates.
    ///
    /// Abscissas must be strictly increasing; there must be at least two
    /// columns and one row.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() < 2 {
            return Err(PwlError::InvalidConfig(format!(
                "grid needs at least 2 columns; got {}",
                xs.len()
            )));
        }
        if ys.is_empty() {
            return Err(PwlError::InvalidConfig("grid needs at least 1 row".into()));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(PwlError::InvalidInput(
                "grid coordinates must be finite".into(),
            ));
        }
        if xs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PwlError::InvalidInput(
                "grid abscissas must be strictly increasing; the sample x range has zero width"
                    .into(),
            ));
        }
        Ok(Self { xs, ys })
    }

    /// Number of columns `m1`.
    #[inline]
    pub fn columns(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows `m2`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    /// Total number of grid points `m1 * m2`.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns() * self.rows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Real coordinates of a grid point.
    #[inline]
    pub fn coords(&self, p: GridPoint) -> (f64, f64) {
        (self.xs[p.i], self.ys[p.j])
    }

    /// Row-major flat index `i * m2 + j`.
    #[inline]
    pub fn flat_index(&self, p: GridPoint) -> usize {
        p.i * self.rows() + p.j
    }

    /// All points of column `i`, in row order.
    pub fn column(&self, i: usize) -> impl Iterator<Item = GridPoint> + '_ {
        (0..self.rows()).map(move |j| GridPoint::new(i, j))
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Vec<Sample> {
        vec![
            Sample::new(0.0, 0.0),
            Sample::new(1.0, 1.0),
            Sample::new(2.0, 0.0),
        ]
    }

    #[test]
    fn spans_sample_range() {
        let grid = Grid::from_samples(&toy(), 3, 3).unwrap();
        assert_eq!(grid.xs(), &[0.0, 1.0, 2.0]);
        assert_eq!(grid.ys(), &[0.0, 0.5, 1.0]);
        assert_eq!(grid.len(), 9);
    }

    #[test]
    fn single_row_uses_minimum_ordinate() {
        let grid = Grid::from_samples(&toy(), 4, 1).unwrap();
        assert_eq!(grid.ys(), &[0.0]);
        assert_eq!(grid.columns(), 4);
    }

    #[test]
    fn flat_index_is_row_major() {
        let grid = Grid::from_samples(&toy(), 3, 4).unwrap();
        assert_eq!(grid.flat_index(GridPoint::new(0, 0)), 0);
        assert_eq!(grid.flat_index(GridPoint::new(0, 3)), 3);
        assert_eq!(grid.flat_index(GridPoint::new(2, 1)), 9);
    }

    #[test]
    fn zero_width_range_rejected() {
        let samples = vec![Sample::new(1.0, 0.0), Sample::new(1.0, 2.0)];
        let err = Grid::from_samples(&samples, 3, 2).unwrap_err();
        assert!(matches!(err, PwlError::InvalidInput(_)));
    }

    #[test]
    fn column_iterates_rows_in_order() {
        let grid = Grid::from_samples(&toy(), 3, 3).unwrap();
        let col: Vec<_> = grid.column(2).collect();
        assert_eq!(
            col,
            vec![GridPoint::new(2, 0), GridPoint::new(2, 1), GridPoint::new(2, 2)]
        );
    }
}
