//! Error types for sleep sort

use std::time::Duration;

use thiserror::Error;

/// Sorter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    // Input errors
    #[error("Invalid input: value {value} at index {index} is negative")]
    InvalidInput { index: usize, value: i64 },

    // Scheduling errors
    #[error("Scheduling error: {0}")]
    Scheduling(String),

    #[error("Timed out after {limit:?}: {completed} of {total} tasks completed")]
    Timeout {
        limit: Duration,
        completed: usize,
        total: usize,
    },
}

impl SortError {
    /// Wrap a substrate failure (spawn, join, runtime build) as a scheduling error
    pub fn scheduling(err: impl std::fmt::Display) -> Self {
        SortError::Scheduling(err.to_string())
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_offender() {
        let err = SortError::InvalidInput { index: 2, value: -7 };
        let msg = err.to_string();
        assert!(msg.contains("-7"));
        assert!(msg.contains("index 2"));
    }

    #[test]
    fn test_scheduling_wraps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::OutOfMemory, "no threads left");
        let err = SortError::scheduling(io);
        assert_eq!(err, SortError::Scheduling("no threads left".into()));
        assert_eq!(err.to_string(), "Scheduling error: no threads left");
    }

    #[test]
    fn test_timeout_display() {
        let err = SortError::Timeout {
            limit: Duration::from_millis(5),
            completed: 1,
            total: 3,
        };
        assert_eq!(err.to_string(), "Timed out after 5ms: 1 of 3 tasks completed");
    }
}
