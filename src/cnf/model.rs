//! Satisfying assignments extracted from the engine

use super::Clause;
use itertools::Itertools;

/// A satisfying assignment over every variable the engine has seen
///
/// Entry `i - 1` is `+i` if variable `i` is assigned true and `-i` if it is
/// assigned false, following the convention of pycosat-style bindings. The
/// length is the engine's variable count at the time of the solve, which is
/// the highest variable index mentioned by any loaded clause or assumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    literals: Vec<i32>,
}

impl Model {
    pub(crate) fn new(literals: Vec<i32>) -> Self {
        debug_assert!(literals
            .iter()
            .enumerate()
            .all(|(i, &lit)| lit.unsigned_abs() as usize == i + 1));
        Self { literals }
    }

    /// Number of variables covered by this model
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The signed-literal view of the assignment
    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    /// The truth value assigned to a variable, if it is covered
    pub fn value(&self, variable: usize) -> Option<bool> {
        if variable == 0 || variable > self.literals.len() {
            return None;
        }
        Some(self.literals[variable - 1] > 0)
    }

    /// Check whether at least one literal of the clause holds here
    pub fn satisfies(&self, clause: &Clause) -> bool {
        clause
            .literals
            .iter()
            .any(|&lit| self.value(lit.unsigned_abs() as usize) == Some(lit > 0))
    }

    /// Check whether every clause of a CNF formula holds here
    pub fn satisfies_all(&self, clauses: &[Clause]) -> bool {
        clauses.iter().all(|clause| self.satisfies(clause))
    }

    /// The clause that forbids exactly this assignment
    ///
    /// The disjunction of the negation of every model literal; adding it to
    /// the engine makes this assignment unsatisfiable from then on, which is
    /// what drives enumeration forward.
    pub fn blocking_clause(&self) -> Clause {
        Clause::new(self.literals.iter().map(|&lit| -lit).collect())
    }
}

impl From<Model> for Vec<i32> {
    fn from(model: Model) -> Self {
        model.literals
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.literals.iter().join(", "))
    }
}
