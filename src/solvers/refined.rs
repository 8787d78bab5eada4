//! Top-down DP with a pairwise piece-error cache.
//!
//! Same recurrence as [`TopDown`](super::TopDown). The piece `(a, o) -> (i, j)`
//! is requested once per piece count that reaches `(i, j)`; routing every
//! request through a [`PairwiseErrorCache`](crate::cache::PairwiseErrorCache)
//! evaluates each pair once and trades `O((m1 * m2)^2)` memory for the
//! repeated sample scans. Reconstruction reads piece errors back from the
//! same cache.

use crate::cache::CachedCost;
use crate::error::Result;
use crate::instance::PwlInstance;
use crate::solution::Solution;
use crate::solvers::reconstruct::reconstruct;
use crate::solvers::top_down::Memo;
use crate::traits::PwlSolver;

/// Memoized recursion with cached piece errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Refined;

impl PwlSolver for Refined {
    fn name(&self) -> &'static str {
        "dp-refined"
    }

    fn solve(&self, instance: &PwlInstance) -> Result<Solution> {
        instance.check_feasible()?;

        let mut memo = Memo::new(instance, CachedCost::new(instance));
        memo.fill();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cells = memo.table().filled(),
            hits = memo.costs().hits(),
            misses = memo.costs().misses(),
            cached_pairs = memo.costs().cache().len(),
            "refined table filled"
        );

        let (error, path) = reconstruct(instance, memo.table(), memo.costs())?;
        Ok(instance.solution(path, error))
    }
}
