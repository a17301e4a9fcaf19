//! Error and outcome taxonomy for SAT solving

use thiserror::Error;

/// Errors and terminal outcomes produced by solving and enumeration.
///
/// `Unsatisfiable`, `Unknown`, and `Exhausted` are expected outcomes used
/// for control flow, not defects. They live in the same enum so callers can
/// match on a single type, but each is a distinct variant: "proved no
/// solution" must never be conflated with "gave up at the resource bound."
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The initialization phase name did not match a recognized heuristic
    #[error("invalid initialization phase: {0:?} (expected one of \"false\", \"true\", \"Jeroslow-Wang\", \"random\")")]
    InvalidConfiguration(String),

    /// A clause body contained the literal 0, which is reserved as the
    /// clause terminator
    #[error("literal 0 is not allowed inside a clause body")]
    InvalidClause,

    /// The formula (plus any active assumptions) has no satisfying assignment
    #[error("formula is unsatisfiable")]
    Unsatisfiable,

    /// The engine gave up before reaching a definitive answer, typically
    /// because the propagation limit was exhausted
    #[error("satisfiability could not be determined within the resource bound")]
    Unknown,

    /// Every discoverable satisfying assignment has already been returned
    #[error("enumeration is exhausted")]
    Exhausted,

    /// A session operation was invoked after `close`
    #[error("session was already closed")]
    UseAfterClose,
}

pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_variants_are_distinct() {
        assert_ne!(SolverError::Unsatisfiable, SolverError::Unknown);
        assert_ne!(SolverError::Unknown, SolverError::Exhausted);
    }

    #[test]
    fn test_invalid_configuration_carries_value() {
        let err = SolverError::InvalidConfiguration("bogus".to_string());
        assert!(err.to_string().contains("bogus"));
    }
}
