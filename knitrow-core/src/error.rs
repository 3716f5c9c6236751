//! Core error types for `knitrow`
//!
//! Error types shared by the counter engine and the project aggregate.
//! The engine itself never fails on well-formed values; these cover
//! rejected input and references to counters that do not exist.

use thiserror::Error;

use crate::counter::{CounterId, ValidationResult};

// ============================================================================
// Engine Errors
// ============================================================================

/// A mode name that matches none of the known modes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown mode '{value}'{}",
    .suggestion.map_or_else(String::new, |s| format!("; did you mean '{s}'?"))
)]
pub struct ParseModeError {
    /// The text that failed to parse
    pub value: String,
    /// Closest known mode name, if any is close enough
    pub suggestion: Option<&'static str>,
}

/// Counter construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    /// The payload failed validation
    #[error("invalid counter: {0}")]
    Invalid(ValidationResult),
}

// ============================================================================
// Project Errors
// ============================================================================

/// Errors from project-level counter bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// No counter with this id belongs to the project
    #[error("counter not found: {id}")]
    CounterNotFound {
        /// The id that was looked up
        id: CounterId,
    },

    /// The project has no active counter to act on
    #[error("project has no active counter")]
    NoActiveCounter,

    /// The counter is finished and cannot be advanced
    #[error("counter {id} is already completed; reset it to start over")]
    CounterCompleted {
        /// The completed counter
        id: CounterId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_error_display() {
        let err = ParseModeError {
            value: "incr".to_string(),
            suggestion: Some("increase"),
        };
        assert_eq!(
            err.to_string(),
            "unknown mode 'incr'; did you mean 'increase'?"
        );
    }

    #[test]
    fn test_project_error_display() {
        let err = ProjectError::CounterNotFound {
            id: CounterId::from("abc123"),
        };
        assert!(err.to_string().contains("abc123"));
        assert_eq!(
            ProjectError::NoActiveCounter.to_string(),
            "project has no active counter"
        );
    }
}
