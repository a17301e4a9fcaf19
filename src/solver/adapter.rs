//! Ownership and wire protocol for one engine instance

use crate::cnf::{validate_clauses, Clause, Model};
use crate::config::SolverConfig;
use crate::engine::{SatEngine, SearchStatus};
use crate::error::{Result, SolverError};

/// Owns one engine instance and translates configuration, clauses, and
/// assumptions into engine calls
///
/// The engine is exclusively owned here and is released when the adapter is
/// dropped, on every exit path. Configuration is applied in construction
/// order: seed, verbosity, phase heuristic, then the propagation limit.
/// The limit is applied only when nonzero, since 0 means "unbounded" to
/// callers but "stop immediately" to an engine.
pub struct EngineAdapter {
    engine: Box<dyn SatEngine>,
}

impl EngineAdapter {
    pub fn with_config(mut engine: Box<dyn SatEngine>, config: &SolverConfig) -> Self {
        engine.set_seed(config.seed);
        engine.set_verbosity(config.verbosity);
        engine.set_phase_init(config.phase_init);
        if config.propagation_limit > 0 {
            engine.set_propagation_limit(config.propagation_limit);
        }
        Self { engine }
    }

    /// Stream a batch of clauses into the engine
    ///
    /// The whole batch is validated up front so a malformed clause never
    /// leaves the engine holding part of it. Each clause is streamed as its
    /// literals in order followed by exactly one terminator.
    pub fn load(&mut self, clauses: &[Clause]) -> Result<()> {
        validate_clauses(clauses)?;
        for clause in clauses {
            for &literal in &clause.literals {
                self.engine.add_literal(literal);
            }
            self.engine.terminate_clause();
        }
        Ok(())
    }

    /// Stage unit assumptions for the next search only
    pub fn assume_all(&mut self, literals: &[i32]) -> Result<()> {
        if literals.contains(&0) {
            return Err(SolverError::InvalidClause);
        }
        for &literal in literals {
            self.engine.assume(literal);
        }
        Ok(())
    }

    pub fn search(&mut self) -> SearchStatus {
        self.engine.search()
    }

    /// Read back the full assignment after a `Satisfiable` search
    pub fn model(&self) -> Model {
        let literals = (1..=self.engine.variable_count())
            .map(|var| {
                if self.engine.value_of(var) {
                    var as i32
                } else {
                    -(var as i32)
                }
            })
            .collect();
        Model::new(literals)
    }

    pub fn variable_count(&self) -> usize {
        self.engine.variable_count()
    }

    pub fn reset_phases(&mut self) {
        self.engine.reset_phases();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseInit;
    use crate::engine::DpllEngine;

    fn adapter(config: &SolverConfig) -> EngineAdapter {
        EngineAdapter::with_config(Box::new(DpllEngine::new()), config)
    }

    #[test]
    fn test_load_and_search() {
        let mut adapter = adapter(&SolverConfig::default());
        adapter
            .load(&[Clause::new(vec![1, 2]), Clause::unit(-1)])
            .unwrap();
        assert_eq!(adapter.search(), SearchStatus::Satisfiable);
        let model = adapter.model();
        assert_eq!(model.literals(), &[-1, 2]);
    }

    #[test]
    fn test_load_rejects_zero_literal_before_touching_engine() {
        let mut adapter = adapter(&SolverConfig::default());
        let err = adapter
            .load(&[Clause::unit(1), Clause::new(vec![2, 0])])
            .unwrap_err();
        assert_eq!(err, SolverError::InvalidClause);
        // Nothing from the batch was loaded, not even the well-formed clause
        assert_eq!(adapter.variable_count(), 0);
    }

    #[test]
    fn test_assume_rejects_zero_literal() {
        let mut adapter = adapter(&SolverConfig::default());
        assert_eq!(adapter.assume_all(&[1, 0]), Err(SolverError::InvalidClause));
    }

    #[test]
    fn test_zero_propagation_limit_means_unbounded() {
        // A limit of 0 forwarded literally would abort the very first
        // propagation; the default config must still solve this chain
        let mut adapter = adapter(&SolverConfig::default());
        adapter
            .load(&[Clause::unit(1), Clause::binary(-1, 2), Clause::binary(-2, 3)])
            .unwrap();
        assert_eq!(adapter.search(), SearchStatus::Satisfiable);
    }

    #[test]
    fn test_configured_limit_is_forwarded() {
        let config = SolverConfig {
            propagation_limit: 1,
            ..SolverConfig::default()
        };
        let mut adapter = adapter(&config);
        adapter
            .load(&[Clause::unit(1), Clause::binary(-1, 2), Clause::binary(-2, 3)])
            .unwrap();
        assert_eq!(adapter.search(), SearchStatus::Unknown);
    }

    #[test]
    fn test_phase_config_reaches_engine() {
        let config = SolverConfig {
            phase_init: PhaseInit::False,
            ..SolverConfig::default()
        };
        let mut adapter = adapter(&config);
        adapter.load(&[Clause::binary(1, -1)]).unwrap();
        assert_eq!(adapter.search(), SearchStatus::Satisfiable);
        assert_eq!(adapter.model().literals(), &[-1]);
    }

    #[test]
    fn test_empty_formula_has_empty_model() {
        let mut adapter = adapter(&SolverConfig::default());
        adapter.load(&[]).unwrap();
        assert_eq!(adapter.search(), SearchStatus::Satisfiable);
        assert!(adapter.model().is_empty());
    }
}
