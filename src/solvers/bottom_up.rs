//! Bottom-up dynamic program.
//!
//! Fills the same `(i, j, M)` table as [`TopDown`](super::TopDown), layer by
//! layer in increasing `M`, using only cells of layer `M - 1`. Layer `M`
//! covers the columns a curve can actually reach there: at least `M` (one
//! per piece so far, and never column 0) and at most `m1 - 1 - (K - 1 - M)`
//! (one per piece still to come). Cells outside that band stay unset.
//!
//! Cells within a layer are independent. With the `parallel` feature each
//! layer is evaluated on the rayon pool and written back once it completes,
//! one writer per cell.

use crate::error::Result;
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::segment::DirectCost;
use crate::solution::Solution;
use crate::solvers::reconstruct::reconstruct;
use crate::table::DpTable;
use crate::traits::PwlSolver;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Iterative table filling, one piece-count layer at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct BottomUp;

impl PwlSolver for BottomUp {
    fn name(&self) -> &'static str {
        "dp-bottomup"
    }

    fn solve(&self, instance: &PwlInstance) -> Result<Solution> {
        instance.check_feasible()?;

        let table = fill_table(instance);
        let costs = DirectCost::new(instance);
        let (error, path) = reconstruct(instance, &table, &costs)?;
        Ok(instance.solution(path, error))
    }
}

/// Fill every reachable cell for piece counts `1..=K-1`.
pub fn fill_table(instance: &PwlInstance) -> DpTable {
    let grid = instance.grid();
    let pieces = instance.pieces();
    let m1 = instance.columns();
    let mut table = DpTable::new(m1, instance.rows(), pieces);

    for m in 1..=pieces {
        let hi = m1 - (pieces - m);
        let cells: Vec<GridPoint> = (m..hi).flat_map(|i| grid.column(i)).collect();

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("bottom_up_layer", m, cells = cells.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let values = layer_values(instance, &table, m, &cells);
        for (p, value) in cells.into_iter().zip(values) {
            table.set(p, m, value);
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(cells = table.filled(), "bottom-up table filled");

    table
}

#[cfg(feature = "parallel")]
fn layer_values(instance: &PwlInstance, table: &DpTable, m: usize, cells: &[GridPoint]) -> Vec<f64> {
    cells
        .par_iter()
        .map(|&p| cell_value(instance, table, m, p))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn layer_values(instance: &PwlInstance, table: &DpTable, m: usize, cells: &[GridPoint]) -> Vec<f64> {
    cells
        .iter()
        .map(|&p| cell_value(instance, table, m, p))
        .collect()
}

fn cell_value(instance: &PwlInstance, table: &DpTable, m: usize, p: GridPoint) -> f64 {
    let grid = instance.grid();
    let mut best = f64::INFINITY;
    if m == 1 {
        for from in grid.column(0) {
            best = best.min(instance.segment_error(from, p));
        }
        return best;
    }
    for k in m - 1..p.i {
        for from in grid.column(k) {
            let prev = table.get(from, m - 1).unwrap_or(f64::INFINITY);
            best = best.min(instance.segment_error(from, p) + prev);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::top_down::Memo;

    fn sample_instance(k: usize) -> PwlInstance {
        let x: Vec<f64> = (0..10).map(|v| v as f64 * 0.3).collect();
        let y: Vec<f64> = x.iter().map(|v| v * v - 2.0 * v).collect();
        PwlInstance::from_xy(&x, &y, k, 5, 3).unwrap()
    }

    #[test]
    fn layers_cover_reachable_band() {
        let inst = sample_instance(3);
        let table = fill_table(&inst);
        // m1 = 5, K - 1 = 2: layer 1 spans columns 1..=3, layer 2 spans 2..=4.
        assert!(table.get(GridPoint::new(0, 0), 1).is_none());
        assert!(table.get(GridPoint::new(3, 2), 1).is_some());
        assert!(table.get(GridPoint::new(4, 0), 1).is_none());
        assert!(table.get(GridPoint::new(1, 0), 2).is_none());
        assert!(table.get(GridPoint::new(4, 1), 2).is_some());
        assert_eq!(table.filled(), 3 * 3 + 3 * 3);
    }

    #[test]
    fn shared_cells_match_top_down() {
        let inst = sample_instance(4);
        let table = fill_table(&inst);
        let mut memo = Memo::new(&inst, DirectCost::new(&inst));
        memo.fill();
        for m in 1..=inst.pieces() {
            for i in 0..inst.columns() {
                for j in 0..inst.rows() {
                    let p = GridPoint::new(i, j);
                    if let (Some(a), Some(b)) = (table.get(p, m), memo.table().get(p, m)) {
                        assert_eq!(a.to_bits(), b.to_bits(), "cell ({i},{j},{m}) differs");
                    }
                }
            }
        }
    }

    #[test]
    fn solution_is_feasible() {
        let inst = sample_instance(3);
        let sol = BottomUp.solve(&inst).unwrap();
        assert_eq!(sol.len(), 3);
        assert!(inst.is_feasible(&sol.breakpoints));
        assert!((inst.total_error(&sol.breakpoints) - sol.error).abs() < 1e-12);
    }
}
