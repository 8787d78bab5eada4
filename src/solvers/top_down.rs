//! Top-down memoized dynamic program.
//!
//! `cost(M, i, j)` is the minimum error of an `M`-piece curve whose last
//! breakpoint is `(i, j)`:
//! - `M = 1`: the best single piece from any row of column 0;
//! - `M > 1`: the best `piece((a, o) -> (i, j)) + cost(M - 1, a, o)` over
//!   columns `a` in `[M - 1, i)` and every row `o`.
//!
//! The lower bound `M - 1` leaves one distinct earlier column per remaining
//! piece. Recursion depth is bounded by `K - 1`. The optimum is the smallest
//! `cost(K - 1, m1 - 1, j)` over the rows of the last column.

use crate::error::Result;
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::segment::DirectCost;
use crate::solution::Solution;
use crate::solvers::reconstruct::reconstruct;
use crate::table::DpTable;
use crate::traits::{PwlSolver, SegmentCost};

/// Memoized recursion over `(i, j, M)` with uncached piece errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopDown;

impl PwlSolver for TopDown {
    fn name(&self) -> &'static str {
        "dp-topdown"
    }

    fn solve(&self, instance: &PwlInstance) -> Result<Solution> {
        instance.check_feasible()?;

        let mut memo = Memo::new(instance, DirectCost::new(instance));
        memo.fill();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cells = memo.table().filled(),
            evaluations = memo.costs().evaluations(),
            "top-down table filled"
        );

        let (error, path) = reconstruct(instance, memo.table(), memo.costs())?;
        Ok(instance.solution(path, error))
    }
}

/// Memo table plus the evaluation path that fills it.
///
/// Shared by the plain and the refined top-down engines; they differ only in
/// the [`SegmentCost`] they route piece errors through.
#[derive(Debug)]
pub(crate) struct Memo<'a, C> {
    instance: &'a PwlInstance,
    costs: C,
    table: DpTable,
}

impl<'a, C: SegmentCost> Memo<'a, C> {
    pub(crate) fn new(instance: &'a PwlInstance, costs: C) -> Self {
        let table = DpTable::new(instance.columns(), instance.rows(), instance.pieces());
        Self {
            instance,
            costs,
            table,
        }
    }

    pub(crate) fn table(&self) -> &DpTable {
        &self.table
    }

    pub(crate) fn costs(&self) -> &C {
        &self.costs
    }

    /// Evaluate every last-column cell for K - 1 pieces; returns the optimum.
    pub(crate) fn fill(&mut self) -> f64 {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "memo_fill",
            pieces = self.instance.pieces(),
            columns = self.instance.columns(),
            rows = self.instance.rows()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let pieces = self.instance.pieces();
        let last = self.instance.columns() - 1;
        let mut best = f64::INFINITY;
        for j in 0..self.instance.rows() {
            best = best.min(self.cost(pieces, GridPoint::new(last, j)));
        }
        best
    }

    /// `cost(m, p.i, p.j)`, computed at most once per cell.
    pub(crate) fn cost(&mut self, m: usize, p: GridPoint) -> f64 {
        if let Some(value) = self.table.get(p, m) {
            return value;
        }

        let rows = self.instance.rows();
        let mut best = f64::INFINITY;
        if m == 1 {
            for o in 0..rows {
                let piece = self.costs.cost(GridPoint::new(0, o), p);
                best = best.min(piece);
            }
        } else {
            for a in m - 1..p.i {
                for o in 0..rows {
                    let from = GridPoint::new(a, o);
                    let piece = self.costs.cost(from, p);
                    let total = piece + self.cost(m - 1, from);
                    best = best.min(total);
                }
            }
        }

        self.table.set(p, m, best);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::Exhaustive;

    #[test]
    fn base_case_is_best_single_piece() {
        let inst = PwlInstance::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], 2, 3, 3).unwrap();
        let mut memo = Memo::new(&inst, DirectCost::new(&inst));
        let target = GridPoint::new(2, 0);
        let expected = inst
            .grid()
            .column(0)
            .map(|from| inst.segment_error(from, target))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(memo.cost(1, target), expected);
    }

    #[test]
    fn cells_are_computed_once() {
        let inst = PwlInstance::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 1.0, 3.0], 3, 4, 3)
            .unwrap();
        let mut memo = Memo::new(&inst, DirectCost::new(&inst));
        memo.fill();
        let evals = memo.costs().evaluations();
        let again = memo.cost(2, GridPoint::new(3, 1));
        assert_eq!(memo.costs().evaluations(), evals);
        assert_eq!(Some(again), memo.table().get(GridPoint::new(3, 1), 2));
    }

    #[test]
    fn agrees_with_exhaustive() {
        let x: Vec<f64> = (0..9).map(|k| k as f64).collect();
        let y = vec![0.0, 1.0, 3.0, 2.0, 2.5, 0.5, -1.0, 0.0, 1.0];
        let inst = PwlInstance::from_xy(&x, &y, 3, 5, 4).unwrap();
        let dp = TopDown.solve(&inst).unwrap();
        let full = Exhaustive.solve(&inst).unwrap();
        assert!((dp.error - full.error).abs() < 1e-9);
        assert!(inst.is_feasible(&dp.breakpoints));
    }
}
