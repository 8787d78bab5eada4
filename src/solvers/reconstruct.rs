//! Retrace an optimal breakpoint path from a filled DP table.
//!
//! Starting from the best cell of the last column, each step back looks for
//! the earlier cell `(x, y)` that produced the current value, i.e. the first
//! one in scan order satisfying
//! `C[i][j][M] == piece((x, y) -> (i, j)) + C[x][y][M - 1]`.
//! Columns are scanned from `i - 1` down to `M - 1`, rows upward. The final
//! piece must start in column 0.
//!
//! The comparison is exact. Piece errors come from the same [`SegmentCost`]
//! that built the table, so the sums are bit-identical to the ones stored.
//! A step that finds no match is a broken invariant and is reported as
//! [`PwlError::Reconstruction`], never patched with an arbitrary point.

use crate::error::{PwlError, Result};
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::table::DpTable;
use crate::traits::SegmentCost;

/// Returns the optimal total error and the breakpoints in increasing-column
/// order.
pub fn reconstruct<C: SegmentCost>(
    instance: &PwlInstance,
    table: &DpTable,
    costs: &C,
) -> Result<(f64, Vec<GridPoint>)> {
    let grid = instance.grid();
    let pieces = instance.pieces();
    let last_column = instance.columns() - 1;

    let mut best: Option<(GridPoint, f64)> = None;
    for p in grid.column(last_column) {
        if let Some(value) = table.get(p, pieces) {
            if best.map_or(true, |(_, b)| value < b) {
                best = Some((p, value));
            }
        }
    }
    let (mut current, optimum) = best.ok_or_else(|| {
        PwlError::Reconstruction(format!(
            "no {pieces}-piece cell computed in column {last_column}"
        ))
    })?;

    let mut path = Vec::with_capacity(instance.breakpoints());
    path.push(current);

    let mut m = pieces;
    while m > 1 {
        let target = cell(table, current, m)?;
        current = predecessor(table, costs, current, m, target).ok_or_else(|| {
            PwlError::Reconstruction(format!(
                "no predecessor reproduces C[{}][{}][{m}] = {target}",
                current.i, current.j
            ))
        })?;
        path.push(current);
        m -= 1;
    }

    let target = cell(table, current, 1)?;
    let first = grid
        .column(0)
        .find(|&from| costs.recall(from, current) == Some(target))
        .ok_or_else(|| {
            PwlError::Reconstruction(format!(
                "no first-column start reproduces C[{}][{}][1] = {target}",
                current.i, current.j
            ))
        })?;
    path.push(first);

    path.reverse();
    Ok((optimum, path))
}

fn cell(table: &DpTable, p: GridPoint, m: usize) -> Result<f64> {
    table.get(p, m).ok_or_else(|| {
        PwlError::Reconstruction(format!("C[{}][{}][{m}] was never computed", p.i, p.j))
    })
}

fn predecessor<C: SegmentCost>(
    table: &DpTable,
    costs: &C,
    to: GridPoint,
    m: usize,
    target: f64,
) -> Option<GridPoint> {
    for x in (m - 1..to.i).rev() {
        for y in 0..table.rows() {
            let from = GridPoint::new(x, y);
            let (Some(piece), Some(prev)) = (costs.recall(from, to), table.get(from, m - 1)) else {
                continue;
            };
            if target == piece + prev {
                return Some(from);
            }
        }
    }
    None
}
