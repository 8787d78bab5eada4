//! Pruned backtracking search.
//!
//! Explores the same space as [`Exhaustive`](super::Exhaustive) and returns
//! the same optimum, but cuts branches early:
//! - optimality: a prefix whose accumulated error already meets or exceeds
//!   the incumbent is abandoned;
//! - feasibility: the first breakpoint is pinned to column 0, the last to
//!   column m1 - 1, and every intermediate breakpoint leaves one distinct
//!   column for each breakpoint still to place.
//!
//! The prefix error is carried down the recursion and accumulated left to
//! right, so a complete sequence scores exactly what
//! [`PwlInstance::total_error`] would give it.

use std::ops::Range;

use crate::error::Result;
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::solution::Solution;
use crate::solvers::Incumbent;
use crate::traits::PwlSolver;

/// Backtracking engine with optimality and feasibility pruning.
#[derive(Clone, Copy, Debug, Default)]
pub struct Backtracking;

impl PwlSolver for Backtracking {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn solve(&self, instance: &PwlInstance) -> Result<Solution> {
        instance.check_feasible()?;

        let mut best = Incumbent::new();
        let mut current = Vec::with_capacity(instance.breakpoints());
        let mut visited = 0usize;
        descend(instance, &mut current, 0.0, &mut best, &mut visited);

        #[cfg(feature = "tracing")]
        tracing::debug!(error = best.error(), visited, "backtracking finished");

        best.into_solution(instance)
    }
}

/// Columns the next breakpoint may occupy given the current prefix length.
fn candidate_columns(instance: &PwlInstance, current: &[GridPoint]) -> Range<usize> {
    let k = instance.breakpoints();
    let m1 = instance.columns();
    match current.last() {
        None => 0..1,
        Some(_) if current.len() == k - 1 => m1 - 1..m1,
        Some(last) => last.i + 1..m1 - (k - current.len()) + 1,
    }
}

fn descend(
    instance: &PwlInstance,
    current: &mut Vec<GridPoint>,
    partial: f64,
    best: &mut Incumbent,
    visited: &mut usize,
) {
    *visited += 1;
    if current.len() == instance.breakpoints() {
        best.offer(partial, current);
        return;
    }
    if partial >= best.error() {
        return;
    }

    let grid = instance.grid();
    for i in candidate_columns(instance, current) {
        for p in grid.column(i) {
            let step = match current.last() {
                Some(&prev) => partial + instance.segment_error(prev, p),
                None => partial,
            };
            current.push(p);
            descend(instance, current, step, best, visited);
            current.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::Exhaustive;

    fn wave() -> PwlInstance {
        let x: Vec<f64> = (0..12).map(|k| k as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|v| (v * 1.3).sin()).collect();
        PwlInstance::from_xy(&x, &y, 4, 6, 4).unwrap()
    }

    #[test]
    fn first_and_last_columns_are_pinned() {
        let inst = wave();
        assert_eq!(candidate_columns(&inst, &[]), 0..1);
        let three = [GridPoint::new(0, 0), GridPoint::new(1, 0), GridPoint::new(2, 0)];
        assert_eq!(candidate_columns(&inst, &three), 5..6);
    }

    #[test]
    fn intermediate_columns_leave_room() {
        let inst = wave();
        // K = 4, m1 = 6: after column 0 the second point may use columns 1..=3.
        assert_eq!(candidate_columns(&inst, &[GridPoint::new(0, 2)]), 1..4);
        let two = [GridPoint::new(0, 0), GridPoint::new(2, 1)];
        assert_eq!(candidate_columns(&inst, &two), 3..5);
    }

    #[test]
    fn matches_exhaustive_optimum() {
        let inst = wave();
        let pruned = Backtracking.solve(&inst).unwrap();
        let full = Exhaustive.solve(&inst).unwrap();
        assert_eq!(pruned.error, full.error);
        assert!(inst.is_feasible(&pruned.breakpoints));
        assert_eq!(inst.total_error(&pruned.breakpoints), pruned.error);
    }
}
