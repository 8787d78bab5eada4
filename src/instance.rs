//! A fixed approximation problem: samples, grid and breakpoint count.
//!
//! [`PwlInstance`] is the read-only input every engine works from. It is
//! validated once on construction, so engines never see an empty sample set,
//! unsorted abscissas or an out-of-range parameter.

use std::sync::Arc;

use crate::error::{PwlError, Result};
use crate::grid::{Grid, GridPoint, Sample};
use crate::segment::segment_error;
use crate::solution::Solution;

/// Validated PWL approximation instance.
#[derive(Clone, Debug)]
pub struct PwlInstance {
    samples: Arc<[Sample]>,
    grid: Grid,
    breakpoints: usize,
}

impl PwlInstance {
    /// Build an instance whose `m1 x m2` grid spans the sample range.
    pub fn new(samples: Vec<Sample>, breakpoints: usize, m1: usize, m2: usize) -> Result<Self> {
        check_params(breakpoints, m1, m2)?;
        check_samples(&samples)?;
        let grid = Grid::from_samples(&samples, m1, m2)?;
        Ok(Self {
            samples: samples.into(),
            grid,
            breakpoints,
        })
    }

    /// Build an instance from parallel coordinate slices.
    pub fn from_xy(x: &[f64], y: &[f64], breakpoints: usize, m1: usize, m2: usize) -> Result<Self> {
        if x.len() != y.len() {
            return Err(PwlError::InvalidInput(format!(
                "x and y must have equal length; got {} and {}",
                x.len(),
                y.len()
            )));
        }
        let samples = x.iter().zip(y).map(|(&x, &y)| Sample::new(x, y)).collect();
        Self::new(samples, breakpoints, m1, m2)
    }

    /// Build an instance over an explicit grid.
    pub fn with_grid(samples: Vec<Sample>, grid: Grid, breakpoints: usize) -> Result<Self> {
        check_params(breakpoints, grid.columns(), grid.rows())?;
        check_samples(&samples)?;
        Ok(Self {
            samples: samples.into(),
            grid,
            breakpoints,
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Breakpoint count K.
    #[inline]
    pub fn breakpoints(&self) -> usize {
        self.breakpoints
    }

    /// Piece count K - 1.
    #[inline]
    pub fn pieces(&self) -> usize {
        self.breakpoints - 1
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Fails with [`PwlError::Infeasible`] when K breakpoints in distinct
    /// columns cannot reach from the first column to the last.
    pub fn check_feasible(&self) -> Result<()> {
        if self.breakpoints > self.columns() {
            return Err(PwlError::Infeasible {
                breakpoints: self.breakpoints,
                columns: self.columns(),
            });
        }
        Ok(())
    }

    /// A breakpoint sequence is feasible when it starts on column 0 and ends
    /// on column m1 - 1.
    pub fn is_feasible(&self, seq: &[GridPoint]) -> bool {
        match (seq.first(), seq.last()) {
            (Some(first), Some(last)) => first.i == 0 && last.i == self.columns() - 1,
            _ => false,
        }
    }

    /// Error of the piece between two grid points (`from.i < to.i`).
    #[inline]
    pub fn segment_error(&self, from: GridPoint, to: GridPoint) -> f64 {
        segment_error(
            &self.samples,
            self.grid.xs()[0],
            self.grid.coords(from),
            self.grid.coords(to),
        )
    }

    /// Sum of piece errors along `seq`, accumulated left to right.
    pub fn total_error(&self, seq: &[GridPoint]) -> f64 {
        seq.windows(2)
            .fold(0.0, |acc, w| acc + self.segment_error(w[0], w[1]))
    }

    /// Materialize a breakpoint sequence as an output record.
    pub fn solution(&self, breakpoints: Vec<GridPoint>, error: f64) -> Solution {
        let (x, y): (Vec<f64>, Vec<f64>) =
            breakpoints.iter().map(|&p| self.grid.coords(p)).unzip();
        Solution {
            breakpoints,
            x,
            y,
            error,
        }
    }
}

fn check_params(breakpoints: usize, m1: usize, m2: usize) -> Result<()> {
    if breakpoints < 2 {
        return Err(PwlError::InvalidConfig(format!(
            "breakpoint count K must be >= 2; got {breakpoints}"
        )));
    }
    if m1 < 2 {
        return Err(PwlError::InvalidConfig(format!(
            "column count m1 must be >= 2; got {m1}"
        )));
    }
    if m2 < 1 {
        return Err(PwlError::InvalidConfig(format!(
            "row count m2 must be >= 1; got {m2}"
        )));
    }
    Ok(())
}

fn check_samples(samples: &[Sample]) -> Result<()> {
    if samples.is_empty() {
        return Err(PwlError::InvalidInput("sample set is empty".into()));
    }
    if let Some(idx) = samples
        .iter()
        .position(|s| !s.x.is_finite() || !s.y.is_finite())
    {
        return Err(PwlError::InvalidInput(format!(
            "sample {idx} has a non-finite coordinate"
        )));
    }
    if let Some(idx) = samples.windows(2).position(|w| w[0].x > w[1].x) {
        return Err(PwlError::InvalidInput(format!(
            "samples must be sorted ascending by x; sample {} precedes a smaller x",
            idx
        )));
    }
    Ok(())
}
