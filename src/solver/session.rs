//! Model enumeration over a long-lived engine instance

use super::EngineAdapter;
use crate::cnf::{validate_clauses, Clause, Model};
use crate::config::SolverConfig;
use crate::engine::{DpllEngine, SatEngine, SearchStatus};
use crate::error::{Result, SolverError};

/// A stateful enumeration session over one engine instance
///
/// Each successful `next` returns a model and permanently blocks it with a
/// clause negating every one of its literals, so the engine can never
/// produce the same assignment twice. Enumeration ends when the engine,
/// with all previous models blocked, reports unsatisfiable, or gives up at
/// its propagation limit. The latter is surfaced as `Unknown` so callers
/// can tell an interrupted enumeration from a complete one. Either way the
/// session is then exhausted for good: blocking clauses and learned state
/// are not undoable, so enumeration is not restartable.
///
/// The engine instance is owned exclusively by the session and released
/// when the session is closed or dropped, whichever comes first.
pub struct Session {
    /// None once the session has been closed
    adapter: Option<EngineAdapter>,
    exhausted: bool,
    assumptions_pending: bool,
}

impl Session {
    /// Open a session over the bundled engine
    pub fn open(cnf: &[Clause], config: &SolverConfig) -> Result<Self> {
        Self::open_with_engine(Box::new(DpllEngine::new()), cnf, config)
    }

    /// Open a session over a caller-supplied engine
    pub fn open_with_engine(
        engine: Box<dyn SatEngine>,
        cnf: &[Clause],
        config: &SolverConfig,
    ) -> Result<Self> {
        let mut adapter = EngineAdapter::with_config(engine, config);
        // On a load error the adapter is dropped here, releasing the engine
        adapter.load(cnf)?;
        Ok(Self {
            adapter: Some(adapter),
            exhausted: false,
            assumptions_pending: false,
        })
    }

    /// Produce the next satisfying assignment
    ///
    /// Assumptions staged with [`assume`](Self::assume) apply to this call
    /// only. Without assumptions, an unsatisfiable search means every model
    /// has been seen and the session becomes exhausted; under assumptions
    /// the failure is scoped to the assumptions and the session stays open.
    pub fn next(&mut self) -> Result<Model> {
        let adapter = self.adapter.as_mut().ok_or(SolverError::UseAfterClose)?;
        if self.exhausted {
            return Err(SolverError::Exhausted);
        }
        let assumed = std::mem::take(&mut self.assumptions_pending);
        match adapter.search() {
            SearchStatus::Satisfiable => {
                let model = adapter.model();
                log::trace!("enumerated model over {} variables", model.len());
                // Clear phase hints first so the initialization heuristic
                // does not steer the next search back toward the assignment
                // being excluded
                adapter.reset_phases();
                adapter.load(&[model.blocking_clause()])?;
                Ok(model)
            }
            SearchStatus::Unsatisfiable => {
                if assumed {
                    Err(SolverError::Unsatisfiable)
                } else {
                    self.exhausted = true;
                    Err(SolverError::Exhausted)
                }
            }
            SearchStatus::Unknown => {
                if !assumed {
                    self.exhausted = true;
                }
                Err(SolverError::Unknown)
            }
        }
    }

    /// Append additional CNF constraints to the live engine
    ///
    /// Allowed at any point between `next` calls. Phase hints are reset
    /// first, matching `next`, since the cached bias may not survive a
    /// clause-set mutation.
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        let adapter = self.adapter.as_mut().ok_or(SolverError::UseAfterClose)?;
        validate_clauses(clauses)?;
        adapter.reset_phases();
        adapter.load(clauses)
    }

    /// Stage unit assumptions for the next `next` call only
    pub fn assume(&mut self, literals: &[i32]) -> Result<()> {
        let adapter = self.adapter.as_mut().ok_or(SolverError::UseAfterClose)?;
        adapter.assume_all(literals)?;
        if !literals.is_empty() {
            self.assumptions_pending = true;
        }
        Ok(())
    }

    /// Release the engine instance
    ///
    /// Idempotent; every later operation fails with `UseAfterClose`.
    /// Dropping an open session releases the engine the same way.
    pub fn close(&mut self) {
        self.adapter = None;
    }

    pub fn is_closed(&self) -> bool {
        self.adapter.is_none()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnf(clauses: &[&[i32]]) -> Vec<Clause> {
        clauses
            .iter()
            .map(|lits| Clause::new(lits.to_vec()))
            .collect()
    }

    /// Drain a session, asserting soundness and no repeats along the way
    fn enumerate_all(session: &mut Session, formula: &[Clause], bound: usize) -> Vec<Model> {
        let mut models: Vec<Model> = Vec::new();
        loop {
            match session.next() {
                Ok(model) => {
                    assert!(model.satisfies_all(formula), "unsound model {model}");
                    assert!(!models.contains(&model), "model {model} repeated");
                    models.push(model);
                    assert!(models.len() <= bound, "enumeration failed to terminate");
                }
                Err(SolverError::Exhausted) => return models,
                Err(other) => panic!("unexpected enumeration outcome: {other}"),
            }
        }
    }

    #[test]
    fn test_enumerates_exactly_four_models_of_two_free_variables() {
        let formula = cnf(&[&[1, -1], &[2, -2]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        let models = enumerate_all(&mut session, &formula, 4);
        assert_eq!(models.len(), 4);

        // The terminal state is sticky
        assert_eq!(session.next(), Err(SolverError::Exhausted));
        assert_eq!(session.next(), Err(SolverError::Exhausted));
        assert!(session.is_exhausted());
    }

    #[test]
    fn test_enumerates_both_models_of_xor_like_formula() {
        let formula = cnf(&[&[1, 2], &[-1, -2]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        let models = enumerate_all(&mut session, &formula, 2);

        let mut literals: Vec<Vec<i32>> =
            models.iter().map(|m| m.literals().to_vec()).collect();
        literals.sort();
        assert_eq!(literals, vec![vec![-1, 2], vec![1, -2]]);
    }

    #[test]
    fn test_enumeration_is_sound_on_a_wider_formula() {
        let formula = cnf(&[&[1, -5, 4], &[-1, 5, 3, 4], &[-3, -4]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        let models = enumerate_all(&mut session, &formula, 32);
        assert!(!models.is_empty());
    }

    #[test]
    fn test_unsatisfiable_formula_is_exhausted_immediately() {
        let formula = cnf(&[&[1], &[-1]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        assert_eq!(session.next(), Err(SolverError::Exhausted));
        assert_eq!(session.next(), Err(SolverError::Exhausted));
    }

    #[test]
    fn test_empty_formula_yields_one_empty_model() {
        let mut session = Session::open(&[], &SolverConfig::default()).unwrap();
        let model = session.next().unwrap();
        assert!(model.is_empty());
        // Blocking the empty model leaves nothing satisfiable
        assert_eq!(session.next(), Err(SolverError::Exhausted));
    }

    #[test]
    fn test_close_is_idempotent_and_guards_every_operation() {
        let formula = cnf(&[&[1]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        session.close();
        session.close();
        assert!(session.is_closed());
        assert_eq!(session.next(), Err(SolverError::UseAfterClose));
        assert_eq!(
            session.add_clauses(&cnf(&[&[2]])),
            Err(SolverError::UseAfterClose)
        );
        assert_eq!(session.assume(&[1]), Err(SolverError::UseAfterClose));
    }

    #[test]
    fn test_assumptions_constrain_exactly_one_solve() {
        let formula = cnf(&[&[20]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();

        session.assume(&[1, 2, 3, 4, 5]).unwrap();
        let first = session.next().unwrap();
        assert_eq!(&first.literals()[..5], &[1, 2, 3, 4, 5]);
        assert_eq!(first.value(20), Some(true));

        // The next solve runs without the assumptions and may flip them
        let second = session.next().unwrap();
        assert_ne!(second, first);
        assert!(second.satisfies_all(&formula));
    }

    #[test]
    fn test_assumption_scoped_unsatisfiability_leaves_session_open() {
        let formula = cnf(&[&[1]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();

        session.assume(&[-1]).unwrap();
        assert_eq!(session.next(), Err(SolverError::Unsatisfiable));
        assert!(!session.is_exhausted());

        // Without the assumption the formula still has its one model
        let model = session.next().unwrap();
        assert_eq!(model.literals(), &[1]);
        assert_eq!(session.next(), Err(SolverError::Exhausted));
    }

    #[test]
    fn test_clauses_added_between_solves_are_respected() {
        let formula = cnf(&[&[1, -5, 4], &[-1, 5, 3, 4], &[-3, -4]]);
        let extra = cnf(&[&[2]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        session.add_clauses(&extra).unwrap();

        let model = session.next().unwrap();
        assert!(model.satisfies_all(&formula));
        assert!(model.satisfies_all(&extra));
    }

    #[test]
    fn test_clause_addition_narrows_remaining_enumeration() {
        let formula = cnf(&[&[1, -1], &[2, -2]]);
        let mut session = Session::open(&formula, &SolverConfig::default()).unwrap();
        let first = session.next().unwrap();

        session.add_clauses(&cnf(&[&[1]])).unwrap();
        let mut remaining = 0;
        loop {
            match session.next() {
                Ok(model) => {
                    assert_eq!(model.value(1), Some(true));
                    assert_ne!(model, first);
                    remaining += 1;
                    assert!(remaining <= 4);
                }
                Err(SolverError::Exhausted) => break,
                Err(other) => panic!("unexpected outcome: {other}"),
            }
        }
        assert!(remaining >= 1);
    }

    #[test]
    fn test_invalid_clause_in_add_clauses() {
        let mut session = Session::open(&cnf(&[&[1]]), &SolverConfig::default()).unwrap();
        assert_eq!(
            session.add_clauses(&cnf(&[&[0]])),
            Err(SolverError::InvalidClause)
        );
        // The session is still usable afterwards
        assert!(session.next().is_ok());
    }

    #[test]
    fn test_propagation_limit_interrupts_enumeration_distinctly() {
        let formula = cnf(&[&[1], &[-1, 2], &[-2, 3]]);
        let config = SolverConfig {
            propagation_limit: 1,
            ..SolverConfig::default()
        };
        let mut session = Session::open(&formula, &config).unwrap();

        // Interrupted, and distinguishable from genuine exhaustion
        assert_eq!(session.next(), Err(SolverError::Unknown));
        // But terminal all the same
        assert_eq!(session.next(), Err(SolverError::Exhausted));
        assert!(session.is_exhausted());
    }
}
