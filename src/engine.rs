//! Algorithm selection and dispatch.
//!
//! [`PwlEngine`] pairs a validated [`PwlInstance`] with an [`Algorithm`] and
//! runs it. Every algorithm is a stateless [`PwlSolver`]; tables, caches and
//! incumbents live only for the duration of one run, so repeated runs on the
//! same engine return identical results.
//!
//! ```
//! use pwl_dp::{Algorithm, PwlEngine, PwlInstance};
//!
//! let instance = PwlInstance::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0], 3, 3, 3).unwrap();
//! let engine = PwlEngine::new(instance, Algorithm::BottomUp);
//! let solution = engine.run().unwrap();
//! assert_eq!(solution.y, vec![0.0, 1.0, 0.0]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{PwlError, Result};
use crate::instance::PwlInstance;
use crate::regression::{linear_baseline, RegressionBaseline};
use crate::solution::Solution;
use crate::solvers;
use crate::traits::PwlSolver;

/// The interchangeable optimization algorithms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Enumerate every sequence; exponential, for small grids only.
    Exhaustive,
    /// Enumeration with optimality and feasibility pruning.
    Backtracking,
    /// Memoized recursive DP.
    TopDown,
    /// Iterative layer-by-layer DP.
    BottomUp,
    /// Memoized recursive DP with a pairwise piece-error cache.
    Refined,
}

impl Algorithm {
    /// Every algorithm, cheapest-to-verify first.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Exhaustive,
        Algorithm::Backtracking,
        Algorithm::TopDown,
        Algorithm::BottomUp,
        Algorithm::Refined,
    ];

    /// The dynamic-programming algorithms, which scale past toy grids.
    pub const DP: [Algorithm; 3] = [Algorithm::TopDown, Algorithm::BottomUp, Algorithm::Refined];

    /// Stable selector name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        self.solver().name()
    }

    /// Whether the algorithm enumerates sequences rather than filling a table.
    pub fn is_search(self) -> bool {
        matches!(self, Algorithm::Exhaustive | Algorithm::Backtracking)
    }

    fn solver(self) -> &'static dyn PwlSolver {
        match self {
            Algorithm::Exhaustive => &solvers::Exhaustive,
            Algorithm::Backtracking => &solvers::Backtracking,
            Algorithm::TopDown => &solvers::TopDown,
            Algorithm::BottomUp => &solvers::BottomUp,
            Algorithm::Refined => &solvers::Refined,
        }
    }

    /// Run this algorithm on `instance`.
    pub fn solve(self, instance: &PwlInstance) -> Result<Solution> {
        self.solver().solve(instance)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PwlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exhaustive" | "brute-force" => Ok(Algorithm::Exhaustive),
            "backtracking" => Ok(Algorithm::Backtracking),
            "dp-topdown" | "topdown" => Ok(Algorithm::TopDown),
            "dp-bottomup" | "bottomup" => Ok(Algorithm::BottomUp),
            "dp-refined" | "refined" => Ok(Algorithm::Refined),
            _ => Err(PwlError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A validated instance bound to an algorithm.
#[derive(Clone, Debug)]
pub struct PwlEngine {
    instance: PwlInstance,
    algorithm: Algorithm,
}

impl PwlEngine {
    pub fn new(instance: PwlInstance, algorithm: Algorithm) -> Self {
        Self {
            instance,
            algorithm,
        }
    }

    pub fn instance(&self) -> &PwlInstance {
        &self.instance
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Run the configured algorithm.
    pub fn run(&self) -> Result<Solution> {
        self.run_with(self.algorithm)
    }

    /// Run a specific algorithm on the same instance.
    pub fn run_with(&self, algorithm: Algorithm) -> Result<Solution> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "pwl_run",
            algorithm = algorithm.name(),
            breakpoints = self.instance.breakpoints(),
            columns = self.instance.columns(),
            rows = self.instance.rows(),
            samples = self.instance.samples().len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let solution = algorithm.solve(&self.instance)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            error = solution.error,
            breakpoints = ?solution.breakpoints,
            "optimal curve found"
        );

        Ok(solution)
    }

    /// Least-squares line over the same samples, for comparison.
    pub fn baseline(&self) -> Result<RegressionBaseline> {
        linear_baseline(&self.instance)
    }
}
