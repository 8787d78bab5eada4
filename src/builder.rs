use crate::engine::{Algorithm, PwlEngine};
use crate::error::Result;
use crate::grid::{Grid, Sample};
use crate::instance::PwlInstance;

/// Breakpoint count used when none is given.
pub const DEFAULT_BREAKPOINTS: usize = 3;
/// Grid columns used when none are given.
pub const DEFAULT_COLUMNS: usize = 6;
/// Grid rows used when none are given.
pub const DEFAULT_ROWS: usize = 6;

/// Step-by-step configuration of a [`PwlEngine`].
///
/// Validation happens in [`build`](Self::build), before any algorithm runs.
#[derive(Clone, Debug)]
pub struct PwlEngineBuilder {
    samples: Vec<Sample>,
    breakpoints: usize,
    columns: usize,
    rows: usize,
    grid: Option<Grid>,
    algorithm: Algorithm,
}

impl PwlEngineBuilder {
    pub fn new<S: Into<Sample>>(samples: impl IntoIterator<Item = S>) -> Self {
        Self {
            samples: samples.into_iter().map(Into::into).collect(),
            breakpoints: DEFAULT_BREAKPOINTS,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            grid: None,
            algorithm: Algorithm::TopDown,
        }
    }

    /// Number of breakpoints K (K - 1 pieces).
    pub fn with_breakpoints(mut self, breakpoints: usize) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Grid columns m1.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Grid rows m2.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Use explicit grid coordinates instead of spanning the sample range.
    /// Overrides the column and row counts.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn build(self) -> Result<PwlEngine> {
        let instance = match self.grid {
            Some(grid) => PwlInstance::with_grid(self.samples, grid, self.breakpoints)?,
            None => PwlInstance::new(self.samples, self.breakpoints, self.columns, self.rows)?,
        };
        Ok(PwlEngine::new(instance, self.algorithm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PwlError;

    fn tent() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]
    }

    #[test]
    fn defaults_apply() {
        let engine = PwlEngineBuilder::new(tent()).build().unwrap();
        assert_eq!(engine.algorithm(), Algorithm::TopDown);
        assert_eq!(engine.instance().breakpoints(), DEFAULT_BREAKPOINTS);
        assert_eq!(engine.instance().columns(), DEFAULT_COLUMNS);
        assert_eq!(engine.instance().rows(), DEFAULT_ROWS);
    }

    #[test]
    fn explicit_grid_overrides_shape() {
        let grid = Grid::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.5, 1.0]).unwrap();
        let engine = PwlEngineBuilder::new(tent())
            .with_columns(10)
            .with_grid(grid)
            .build()
            .unwrap();
        assert_eq!(engine.instance().columns(), 3);
        assert_eq!(engine.instance().rows(), 3);
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let err = PwlEngineBuilder::new(tent())
            .with_breakpoints(1)
            .build()
            .unwrap_err();
        assert!(matches!(err, PwlError::InvalidConfig(_)));

        let err = PwlEngineBuilder::new(Vec::<Sample>::new()).build().unwrap_err();
        assert!(matches!(err, PwlError::InvalidInput(_)));
    }
}
