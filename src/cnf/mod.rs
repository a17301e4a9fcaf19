//! CNF data model: clauses, models, and literal validation

pub mod clause;
pub mod model;

pub use clause::{validate_clauses, Clause};
pub use model::Model;
