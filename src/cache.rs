//! Pairwise piece-error cache used by the refined DP engine.
//!
//! The cache is a dense symmetric matrix over grid points (flat index
//! `i * m2 + j`). Each unordered pair is written at most once per run; a
//! recomputation would yield the same value, so there is no invalidation and
//! no eviction. Memory is `O((m1 * m2)^2)` and bounded by the grid, not by the
//! number of queries.

use crate::grid::{Grid, GridPoint};
use crate::instance::PwlInstance;
use crate::traits::SegmentCost;

/// Symmetric `(m1*m2) x (m1*m2)` matrix of optional piece errors.
#[derive(Clone, Debug)]
pub struct PairwiseErrorCache {
    rows: usize,
    nodes: usize,
    cells: Vec<Option<f64>>,
}

impl PairwiseErrorCache {
    /// Empty cache sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self::with_shape(grid.columns(), grid.rows())
    }

    /// Empty cache for an `m1 x m2` grid.
    pub fn with_shape(m1: usize, m2: usize) -> Self {
        let nodes = m1 * m2;
        Self {
            rows: m2,
            nodes,
            cells: vec![None; nodes * nodes],
        }
    }

    /// Number of grid points (matrix side length).
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    fn slot(&self, a: usize, b: usize) -> usize {
        a * self.nodes + b
    }

    #[inline]
    fn flat(&self, p: GridPoint) -> usize {
        p.i * self.rows + p.j
    }

    /// Whether the pair `{a, b}` has been stored.
    #[inline]
    pub fn has(&self, a: GridPoint, b: GridPoint) -> bool {
        self.get(a, b).is_some()
    }

    /// Stored error of the pair `{a, b}`.
    #[inline]
    pub fn get(&self, a: GridPoint, b: GridPoint) -> Option<f64> {
        self.cells[self.slot(self.flat(a), self.flat(b))]
    }

    /// Store the error of the pair `{a, b}` in both orientations.
    pub fn set(&mut self, a: GridPoint, b: GridPoint, value: f64) {
        let (fa, fb) = (self.flat(a), self.flat(b));
        let ab = self.slot(fa, fb);
        let ba = self.slot(fb, fa);
        self.cells[ab] = Some(value);
        self.cells[ba] = Some(value);
    }

    /// Number of stored unordered pairs.
    pub fn len(&self) -> usize {
        let stored = self.cells.iter().filter(|c| c.is_some()).count();
        let diagonal = (0..self.nodes)
            .filter(|&k| self.cells[self.slot(k, k)].is_some())
            .count();
        (stored + diagonal) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Cached evaluation path: misses are evaluated once and remembered.
#[derive(Debug)]
pub struct CachedCost<'a> {
    instance: &'a PwlInstance,
    cache: PairwiseErrorCache,
    hits: usize,
    misses: usize,
}

impl<'a> CachedCost<'a> {
    pub fn new(instance: &'a PwlInstance) -> Self {
        Self {
            instance,
            cache: PairwiseErrorCache::new(instance.grid()),
            hits: 0,
            misses: 0,
        }
    }

    pub fn cache(&self) -> &PairwiseErrorCache {
        &self.cache
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl SegmentCost for CachedCost<'_> {
    fn cost(&mut self, from: GridPoint, to: GridPoint) -> f64 {
        if let Some(value) = self.cache.get(from, to) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = self.instance.segment_error(from, to);
        self.cache.set(from, to, value);
        value
    }

    fn recall(&self, from: GridPoint, to: GridPoint) -> Option<f64> {
        self.cache.get(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        let cache = PairwiseErrorCache::with_shape(3, 2);
        assert_eq!(cache.nodes(), 6);
        assert!(cache.is_empty());
        assert!(!cache.has(GridPoint::new(0, 0), GridPoint::new(2, 1)));
    }

    #[test]
    fn set_is_symmetric() {
        let mut cache = PairwiseErrorCache::with_shape(3, 2);
        let a = GridPoint::new(0, 1);
        let b = GridPoint::new(2, 0);
        cache.set(a, b, 1.25);
        assert_eq!(cache.get(a, b), Some(1.25));
        assert_eq!(cache.get(b, a), Some(1.25));
        assert!(cache.has(b, a));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_is_a_stored_value() {
        let mut cache = PairwiseErrorCache::with_shape(2, 1);
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(1, 0);
        cache.set(a, b, 0.0);
        assert!(cache.has(a, b));
        assert_eq!(cache.get(b, a), Some(0.0));
    }

    #[test]
    fn cached_cost_counts_hits_and_misses() {
        let inst =
            PwlInstance::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], 2, 3, 2).unwrap();
        let mut costs = CachedCost::new(&inst);
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(2, 1);
        assert_eq!(costs.recall(a, b), None);

        let first = costs.cost(a, b);
        let second = costs.cost(a, b);
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(costs.misses(), 1);
        assert_eq!(costs.hits(), 1);
        assert_eq!(costs.recall(b, a), Some(first));
        assert_eq!(first, inst.segment_error(a, b));
    }
}
