//! SAT solving as a library surface: one-shot solving and model enumeration
//!
//! This crate stages CNF input, validates solver configuration, and drives a
//! SAT engine through a narrow interface, either the bundled DPLL backend
//! or any other implementation of [`SatEngine`]. A single call answers one
//! satisfiability question; a [`Session`] turns the engine into an
//! enumerator over every satisfying assignment via blocking clauses, with
//! incremental clause addition and one-shot assumptions between solves.
//!
//! ```
//! use satyrn::{solve, Clause, Session, SolverConfig};
//!
//! let formula = vec![Clause::new(vec![1, 2]), Clause::new(vec![-1, -2])];
//! let config = SolverConfig::default();
//!
//! // One satisfying assignment
//! let model = solve(&formula, &config).unwrap();
//! assert!(model.satisfies_all(&formula));
//!
//! // All of them
//! let mut session = Session::open(&formula, &config).unwrap();
//! let mut count = 0;
//! while session.next().is_ok() {
//!     count += 1;
//! }
//! assert_eq!(count, 2);
//! ```

pub mod cnf;
pub mod config;
pub mod engine;
pub mod error;
pub mod solver;

pub use cnf::{Clause, Model};
pub use engine::{DpllEngine, SatEngine, SearchStatus};
pub use config::{PhaseInit, SolverConfig};
pub use error::{Result, SolverError};
pub use solver::{solve, solve_with_engine, Session};
