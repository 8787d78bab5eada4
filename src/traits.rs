//! Core trait definitions shared by the engines.
//!
//! Two seams keep the algorithms independent of each other:
//! - [`SegmentCost`] is the evaluation path a DP engine routes every piece
//!   error through. The plain path rescans the samples on each request; the
//!   cached path remembers each pair of grid points it has seen.
//! - [`PwlSolver`] is one complete algorithm: given a validated instance it
//!   returns the optimal breakpoint sequence or a typed failure.
//!
//! A single run must use one evaluation path throughout. Reconstruction
//! compares table values for exact equality, so it must see the very numbers
//! the table was built from.

use crate::error::Result;
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::solution::Solution;

/// Source of piece errors for a DP run.
pub trait SegmentCost {
    /// Error of the piece `from -> to` (`from.i < to.i`), evaluating it if
    /// this path has not produced it yet.
    fn cost(&mut self, from: GridPoint, to: GridPoint) -> f64;

    /// Error of a piece as this path produced it during table construction.
    ///
    /// Returns `None` when the path never produced that piece; callers treat
    /// this as an invariant violation rather than evaluating afresh.
    fn recall(&self, from: GridPoint, to: GridPoint) -> Option<f64>;
}

/// One PWL approximation algorithm.
///
/// Implementations must be deterministic and free of state that outlives a
/// call: solving the same instance twice yields the same [`Solution`].
pub trait PwlSolver {
    /// Short stable identifier, e.g. `"dp-topdown"`.
    fn name(&self) -> &'static str;

    /// Compute an optimal feasible breakpoint sequence for `instance`.
    fn solve(&self, instance: &PwlInstance) -> Result<Solution>;
}
