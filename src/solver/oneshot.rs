//! One-shot solving: configure, load, search, classify, release

use super::EngineAdapter;
use crate::cnf::{Clause, Model};
use crate::config::SolverConfig;
use crate::engine::{DpllEngine, SatEngine, SearchStatus};
use crate::error::{Result, SolverError};

/// Solve a CNF formula once with the bundled engine
///
/// Returns the satisfying assignment, or `Unsatisfiable` when the engine
/// proves there is none, or `Unknown` when the engine gives up at its
/// resource bound. These three outcomes are mutually exclusive and
/// exhaustive for a completed call. The engine lives only for the duration
/// of the call and is released on every path out of it.
pub fn solve(cnf: &[Clause], config: &SolverConfig) -> Result<Model> {
    solve_with_engine(Box::new(DpllEngine::new()), cnf, config)
}

/// Solve a CNF formula once with a caller-supplied engine
pub fn solve_with_engine(
    engine: Box<dyn SatEngine>,
    cnf: &[Clause],
    config: &SolverConfig,
) -> Result<Model> {
    let mut adapter = EngineAdapter::with_config(engine, config);
    adapter.load(cnf)?;
    match adapter.search() {
        SearchStatus::Satisfiable => Ok(adapter.model()),
        SearchStatus::Unsatisfiable => Err(SolverError::Unsatisfiable),
        SearchStatus::Unknown => Err(SolverError::Unknown),
    }
}
