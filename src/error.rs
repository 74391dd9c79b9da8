//! Error taxonomy for the associative memory.

use thiserror::Error;

/// Why a pattern was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternDefect {
    /// Pattern length differs from the memory's pattern size.
    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },

    /// A training pattern holds something other than -1 or +1.
    #[error("element {position} is {value}, not -1 or +1")]
    NonBipolar { position: usize, value: f64 },
}

/// Errors raised by [`AssociativeMemory`](crate::memory::associative::AssociativeMemory).
///
/// All of them are detected before any state is touched, so a failed call
/// leaves the memory exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoryError {
    /// Pattern size must be at least one.
    #[error("pattern size must be positive, got {0}")]
    InvalidDimension(usize),

    /// A training pattern or query is malformed.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] PatternDefect),

    /// `train` was called without any pattern.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// `max_iterations` must be at least one.
    #[error("iteration bound must be positive")]
    InvalidIterationBound,
}

pub type Result<T> = std::result::Result<T, MemoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defect_converts_into_invalid_pattern() {
        let err: MemoryError = PatternDefect::Length {
            expected: 25,
            found: 24,
        }
        .into();
        assert!(matches!(err, MemoryError::InvalidPattern(_)));
        assert_eq!(err.to_string(), "invalid pattern: expected 25 elements, found 24");
    }

    #[test]
    fn test_non_bipolar_message() {
        let defect = PatternDefect::NonBipolar {
            position: 3,
            value: 0.5,
        };
        assert!(defect.to_string().contains("element 3 is 0.5"));
    }
}
