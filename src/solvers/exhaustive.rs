//! Exhaustive search over every column-increasing breakpoint sequence.
//!
//! The correctness baseline: no pruning, exponential time, meant for small
//! grids. Sequences are enumerated column-major (column, then row) starting
//! from every grid point; the first sequence reaching the minimum error wins.
//!
//! Each choice of first breakpoint is an independent branch. With the
//! `parallel` feature the branches run on the rayon pool and their
//! incumbents are merged back in enumeration order, which keeps the
//! tie-break identical to the sequential run.

use crate::error::Result;
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::solution::Solution;
use crate::solvers::Incumbent;
use crate::traits::PwlSolver;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Brute-force enumeration engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exhaustive;

impl PwlSolver for Exhaustive {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, instance: &PwlInstance) -> Result<Solution> {
        instance.check_feasible()?;

        let grid = instance.grid();
        let roots: Vec<GridPoint> = (0..grid.columns()).flat_map(|i| grid.column(i)).collect();
        let best = search_roots(instance, &roots);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            error = best.error(),
            branches = roots.len(),
            "exhaustive search finished"
        );

        best.into_solution(instance)
    }
}

#[cfg(feature = "parallel")]
fn search_roots(instance: &PwlInstance, roots: &[GridPoint]) -> Incumbent {
    roots
        .par_iter()
        .map(|&root| search_branch(instance, root))
        .collect::<Vec<_>>()
        .into_iter()
        .fold(Incumbent::new(), Incumbent::merge)
}

#[cfg(not(feature = "parallel"))]
fn search_roots(instance: &PwlInstance, roots: &[GridPoint]) -> Incumbent {
    roots
        .iter()
        .map(|&root| search_branch(instance, root))
        .fold(Incumbent::new(), Incumbent::merge)
}

/// Best sequence among those starting at `root`.
fn search_branch(instance: &PwlInstance, root: GridPoint) -> Incumbent {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("exhaustive_branch", i = root.i, j = root.j);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut best = Incumbent::new();
    let mut current = Vec::with_capacity(instance.breakpoints());
    current.push(root);
    enumerate(instance, &mut current, &mut best);
    best
}

fn enumerate(instance: &PwlInstance, current: &mut Vec<GridPoint>, best: &mut Incumbent) {
    if current.len() == instance.breakpoints() {
        if instance.is_feasible(current) {
            let error = instance.total_error(current);
            best.offer(error, current);
        }
        return;
    }

    let grid = instance.grid();
    let next = current.last().map_or(0, |p| p.i + 1);
    for i in next..grid.columns() {
        for p in grid.column(i) {
            current.push(p);
            enumerate(instance, current, best);
            current.pop();
        }
    }
}
