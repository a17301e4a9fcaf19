//! Solving entry points built on the engine interface

pub mod adapter;
pub mod oneshot;
pub mod session;

pub use adapter::EngineAdapter;
pub use oneshot::{solve, solve_with_engine};
pub use session::Session;
