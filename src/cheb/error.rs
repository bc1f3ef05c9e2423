//! Error types for the Chebyshev engine
//!
//! Every variant is a caller contract violation; none are transient.

/// Chebyshev engine error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChebError {
    #[error("Invalid grid size: n = {n} (need n >= 3)")]
    InvalidGridSize { n: usize },

    #[error("Invalid interval: lower = {lower}, upper = {upper} (need finite lower < upper)")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("Chebyshev session already initialized")]
    AlreadyInitialized,

    #[error("Chebyshev session not initialized")]
    NotInitialized,

    #[error("Point index {index} out of range for n = {n}")]
    IndexOutOfRange { index: usize, n: usize },

    #[error("Buffer `{name}` has length {actual}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Transform plan has size {actual}, expected {expected}")]
    PlanSizeMismatch { expected: usize, actual: usize },

    #[error("Point x = {x} lies outside [{lower}, {upper}]")]
    OutOfDomain { x: f64, lower: f64, upper: f64 },
}

impl ChebError {
    /// True for lifecycle errors (init/teardown ordering), false for argument errors
    pub fn is_state_error(&self) -> bool {
        matches!(self, ChebError::AlreadyInitialized | ChebError::NotInitialized)
    }
}

/// Check that a buffer has exactly `expected` elements
pub(crate) fn check_len(name: &'static str, actual: usize, expected: usize) -> Result<(), ChebError> {
    if actual != expected {
        return Err(ChebError::LengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}
