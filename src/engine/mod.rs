//! The narrow interface to a SAT engine and the bundled backend

pub mod dpll;

#[cfg(feature = "cadical")]
pub mod cadical;

pub use dpll::DpllEngine;

use crate::config::PhaseInit;

/// Result of a single engine search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A satisfying assignment was found and can be read back with `value_of`
    Satisfiable,
    /// No satisfying assignment exists under the current clauses and assumptions
    Unsatisfiable,
    /// The search was aborted before a definitive answer, e.g. because the
    /// propagation limit was exhausted
    Unknown,
}

/// The operations this crate requires of a SAT engine
///
/// The engine is a collaborator: the search algorithm behind `search` is of
/// no concern here, only the wire protocol around it. Clauses are streamed
/// as literals with one `terminate_clause` per clause; assumptions hold for
/// exactly the next `search` call. An engine instance is exclusively owned
/// by one caller and is released by dropping it.
pub trait SatEngine {
    /// Append one literal to the clause currently under construction,
    /// growing the tracked variable count if needed
    fn add_literal(&mut self, literal: i32);

    /// Commit the clause under construction
    fn terminate_clause(&mut self);

    /// Force a literal true for the next `search` call only
    fn assume(&mut self, literal: i32);

    /// Run the search under all committed clauses plus staged assumptions,
    /// consuming the assumptions
    fn search(&mut self) -> SearchStatus;

    /// The highest variable index seen so far
    fn variable_count(&self) -> usize;

    /// The assignment of a variable after a `Satisfiable` search
    ///
    /// Only meaningful immediately after `search` returned `Satisfiable`,
    /// for indices in `1..=variable_count()`.
    fn value_of(&self, variable: usize) -> bool;

    /// Discard cached phase hints so the next search starts from the
    /// configured initialization heuristic again
    fn reset_phases(&mut self);

    fn set_seed(&mut self, seed: u64);

    fn set_verbosity(&mut self, level: u32);

    fn set_phase_init(&mut self, phase: PhaseInit);

    /// Bound search effort; the caller must not forward a "no limit"
    /// configuration (0) through this method
    fn set_propagation_limit(&mut self, limit: u64);
}
