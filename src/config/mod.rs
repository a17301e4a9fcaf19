//! Solver configuration and validation

pub mod settings;

pub use settings::{PhaseInit, SolverConfig};
