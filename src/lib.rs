//! Optimal piecewise-linear (PWL) approximation on a discretized grid.
//!
//! Given `n` samples sorted by x, this crate picks `K` breakpoints from an
//! `m1 x m2` grid of candidate abscissas and ordinates so that the connected
//! PWL curve through them minimizes the total absolute error against the
//! samples. A curve is feasible when its first breakpoint lies on the first
//! grid column and its last on the final one.
//!
//! ## Algorithms
//! Five interchangeable engines return the same optimum:
//! - exhaustive enumeration (the correctness baseline),
//! - backtracking with optimality and feasibility pruning,
//! - top-down memoized dynamic programming over `(column, row, pieces)`,
//! - the same table filled bottom-up, layer by layer,
//! - top-down DP routing piece errors through a pairwise cache.
//!
//! The DP engines recover the breakpoints by retracing their table; see
//! [`solvers::reconstruct`].
//!
//! ## Quick start
//! ```
//! use pwl_dp::{Algorithm, PwlEngineBuilder};
//!
//! let samples = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)];
//! let engine = PwlEngineBuilder::new(samples)
//!     .with_breakpoints(3)
//!     .with_columns(3)
//!     .with_rows(3)
//!     .with_algorithm(Algorithm::Refined)
//!     .build()
//!     .unwrap();
//! let solution = engine.run().unwrap();
//! assert_eq!(solution.x, vec![0.0, 1.0, 2.0]);
//! assert_eq!(solution.y, vec![0.0, 1.0, 0.0]);
//! assert_eq!(solution.error, 0.0);
//! ```
//!
//! ## Features
//! - `parallel`: evaluate exhaustive-search branches and bottom-up layers on
//!   the rayon pool.
//! - `tracing`: emit spans and debug events from the engines.
//! - `serde`: derive serialization for inputs and output records.

pub mod builder;
pub mod cache;
pub mod engine;
pub mod error;
pub mod grid;
pub mod instance;
pub mod regression;
pub mod segment;
pub mod solution;
pub mod solvers;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::PwlEngineBuilder;
pub use crate::engine::{Algorithm, PwlEngine};
pub use crate::error::{PwlError, Result};
pub use crate::grid::{Grid, GridPoint, Sample};
pub use crate::instance::PwlInstance;
pub use crate::solution::Solution;
pub use crate::traits::{PwlSolver, SegmentCost};
