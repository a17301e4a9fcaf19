//! Clause representation for CNF formulas

use crate::error::{Result, SolverError};
use itertools::Itertools;

/// Represents a SAT clause (disjunction of literals)
///
/// A literal is a non-zero signed integer: its magnitude names a boolean
/// variable (1-based) and its sign the polarity. A CNF formula is a
/// conjunction of clauses. Literals may repeat and a clause may be empty;
/// an empty clause makes the formula unsatisfiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// The highest variable index referenced by this clause
    pub fn max_variable(&self) -> usize {
        self.literals
            .iter()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.literals.iter().join(" "))
    }
}

/// Check that no clause body contains the literal 0
///
/// 0 is the structural clause terminator on the engine wire and is appended
/// by the loader; a caller-supplied 0 is rejected before any clause in the
/// batch reaches the engine.
pub fn validate_clauses(clauses: &[Clause]) -> Result<()> {
    for clause in clauses {
        if clause.literals.contains(&0) {
            return Err(SolverError::InvalidClause);
        }
    }
    Ok(())
}
