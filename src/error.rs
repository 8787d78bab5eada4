//! Error type shared by every engine.
//!
//! Configuration and input problems are reported before any engine runs.
//! `Infeasible` is a distinct outcome, never a sentinel error value, and
//! `Reconstruction` signals a broken internal invariant while retracing a
//! DP table.

/// Errors produced while configuring or running a PWL approximation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PwlError {
    /// Grid or breakpoint parameters out of range (K < 2, m1 < 2, m2 < 1).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sample set cannot be approximated (empty, unsorted, non-finite...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Algorithm selector outside the known set.
    #[error("unknown algorithm `{0}`; expected one of exhaustive, backtracking, dp-topdown, dp-bottomup, dp-refined")]
    UnknownAlgorithm(String),

    /// No sequence of `breakpoints` points with distinct columns can span
    /// all `columns` grid columns.
    #[error("infeasible instance: {breakpoints} breakpoints cannot span {columns} grid columns")]
    Infeasible {
        /// Requested breakpoint count K.
        breakpoints: usize,
        /// Grid column count m1.
        columns: usize,
    },

    /// The DP table could not be retraced; this is an internal defect.
    #[error("reconstruction failed: {0}")]
    Reconstruction(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PwlError>;

#[cfg(test)]
mod tests {
    use super::PwlError;

    #[test]
    fn infeasible_message_names_both_sizes() {
        let err = PwlError::Infeasible {
            breakpoints: 5,
            columns: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('3'));
    }
}
