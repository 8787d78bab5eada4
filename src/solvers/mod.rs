//! The five interchangeable PWL approximation algorithms.
//!
//! Each module implements [`PwlSolver`](crate::traits::PwlSolver):
//! - [`exhaustive`]   : enumerate every column-increasing sequence of K points.
//! - [`backtracking`] : the same search with optimality and feasibility pruning.
//! - [`top_down`]     : memoized recursion over `(i, j, M)`.
//! - [`bottom_up`]    : the same table filled layer by layer.
//! - [`refined`]      : top-down with a pairwise piece-error cache.
//!
//! The search engines share the [`Incumbent`] best-solution record; the DP
//! engines share [`reconstruct`](reconstruct::reconstruct).

use crate::error::{PwlError, Result};
use crate::grid::GridPoint;
use crate::instance::PwlInstance;
use crate::solution::Solution;

pub mod backtracking;
pub mod bottom_up;
pub mod exhaustive;
pub mod reconstruct;
pub mod refined;
pub mod top_down;

pub use backtracking::Backtracking;
pub use bottom_up::BottomUp;
pub use exhaustive::Exhaustive;
pub use refined::Refined;
pub use top_down::TopDown;

/// Best feasible sequence found so far during a search.
///
/// Only ever improves: a candidate replaces the incumbent when its error is
/// strictly smaller, so among equal errors the first one offered wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Incumbent {
    error: f64,
    breakpoints: Vec<GridPoint>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// No solution yet; the error is `+inf`.
    pub fn new() -> Self {
        Self {
            error: f64::INFINITY,
            breakpoints: Vec::new(),
        }
    }

    #[inline]
    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn breakpoints(&self) -> &[GridPoint] {
        &self.breakpoints
    }

    /// Whether any candidate has been accepted.
    pub fn is_set(&self) -> bool {
        !self.breakpoints.is_empty()
    }

    /// Record `seq` if it beats the incumbent. Returns whether it did.
    pub fn offer(&mut self, error: f64, seq: &[GridPoint]) -> bool {
        if error < self.error {
            self.error = error;
            self.breakpoints.clear();
            self.breakpoints.extend_from_slice(seq);
            true
        } else {
            false
        }
    }

    /// Combine with the incumbent of a later branch of the same enumeration.
    pub fn merge(self, later: Self) -> Self {
        if later.error < self.error {
            later
        } else {
            self
        }
    }

    /// Turn the final record into an output, or report infeasibility when
    /// the search never accepted a candidate.
    pub fn into_solution(self, instance: &PwlInstance) -> Result<Solution> {
        if !self.is_set() {
            return Err(PwlError::Infeasible {
                breakpoints: instance.breakpoints(),
                columns: instance.columns(),
            });
        }
        Ok(instance.solution(self.breakpoints, self.error))
    }
}
