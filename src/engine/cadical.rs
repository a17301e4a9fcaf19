//! CaDiCaL backend behind the `SatEngine` trait
//!
//! The `cadical` crate exposes clause loading, assumptions, and model
//! values, but none of the picosat-style tuning knobs. The setters are
//! accepted and ignored so the session layer can drive either backend; a
//! propagation limit therefore cannot make this backend return `Unknown`.

use super::{SatEngine, SearchStatus};
use crate::config::PhaseInit;

/// SAT engine backed by the CaDiCaL solver
pub struct CadicalEngine {
    solver: cadical::Solver,
    staged: Vec<i32>,
    assumptions: Vec<i32>,
    num_vars: usize,
}

impl CadicalEngine {
    pub fn new() -> Self {
        Self {
            solver: Default::default(),
            staged: Vec::new(),
            assumptions: Vec::new(),
            num_vars: 0,
        }
    }

    fn track_variable(&mut self, literal: i32) {
        let var = literal.unsigned_abs() as usize;
        if var > self.num_vars {
            self.num_vars = var;
        }
    }
}

impl Default for CadicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SatEngine for CadicalEngine {
    fn add_literal(&mut self, literal: i32) {
        debug_assert_ne!(literal, 0);
        self.track_variable(literal);
        self.staged.push(literal);
    }

    fn terminate_clause(&mut self) {
        let clause = std::mem::take(&mut self.staged);
        self.solver.add_clause(clause);
    }

    fn assume(&mut self, literal: i32) {
        debug_assert_ne!(literal, 0);
        self.track_variable(literal);
        self.assumptions.push(literal);
    }

    fn search(&mut self) -> SearchStatus {
        let assumptions = std::mem::take(&mut self.assumptions);
        let result = if assumptions.is_empty() {
            self.solver.solve()
        } else {
            self.solver.solve_with(assumptions.into_iter())
        };
        match result {
            Some(true) => SearchStatus::Satisfiable,
            Some(false) => SearchStatus::Unsatisfiable,
            None => SearchStatus::Unknown,
        }
    }

    fn variable_count(&self) -> usize {
        self.num_vars
    }

    fn value_of(&self, variable: usize) -> bool {
        // CaDiCaL reports no value for variables it eliminated as
        // don't-care; either polarity satisfies the formula then
        self.solver.value(variable as i32).unwrap_or(false)
    }

    fn reset_phases(&mut self) {
        log::trace!("reset_phases is a no-op for the cadical backend");
    }

    fn set_seed(&mut self, _seed: u64) {
        log::debug!("seed is not supported by the cadical backend");
    }

    fn set_verbosity(&mut self, _level: u32) {}

    fn set_phase_init(&mut self, _phase: PhaseInit) {
        log::debug!("phase initialization is not supported by the cadical backend");
    }

    fn set_propagation_limit(&mut self, _limit: u64) {
        log::debug!("propagation limit is not supported by the cadical backend");
    }
}
