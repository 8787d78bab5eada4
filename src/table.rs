//! DP table shared by the dynamic-programming engines.
//!
//! Cell `C[i][j][M]` holds the minimum error of an `M`-piece curve whose
//! last breakpoint is grid point `(i, j)`. Cells stay unset until an engine
//! computes them; which cells get filled depends on the engine, and the
//! reconstruction only ever reads cells the recurrence has reached.

use crate::grid::GridPoint;

/// Dense `m1 x m2 x pieces` table of optional errors.
#[derive(Clone, Debug, PartialEq)]
pub struct DpTable {
    columns: usize,
    rows: usize,
    pieces: usize,
    cells: Vec<Option<f64>>,
}

impl DpTable {
    /// Empty table for piece counts `1..=pieces`.
    pub fn new(columns: usize, rows: usize, pieces: usize) -> Self {
        Self {
            columns,
            rows,
            pieces,
            cells: vec![None; columns * rows * pieces],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Largest piece count the table holds.
    pub fn pieces(&self) -> usize {
        self.pieces
    }

    #[inline]
    fn slot(&self, p: GridPoint, m: usize) -> usize {
        debug_assert!(m >= 1 && m <= self.pieces, "piece count {m} out of range");
        debug_assert!(p.i < self.columns && p.j < self.rows);
        ((m - 1) * self.columns + p.i) * self.rows + p.j
    }

    /// Value of `C[p.i][p.j][m]`, if computed.
    #[inline]
    pub fn get(&self, p: GridPoint, m: usize) -> Option<f64> {
        self.cells[self.slot(p, m)]
    }

    #[inline]
    pub fn set(&mut self, p: GridPoint, m: usize, value: f64) {
        let slot = self.slot(p, m);
        self.cells[slot] = Some(value);
    }

    /// Number of computed cells.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
