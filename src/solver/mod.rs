//! Heuristic orchestrator: construction once, then 2-opt to a fixpoint.
//!
//! - [`solve`] — Default configuration, runs until no improving move remains
//! - [`solve_with`] — Explicit [`HeuristicConfig`] (move evaluation, time limit)

mod config;
mod heuristic;

pub use config::HeuristicConfig;
pub use heuristic::{solve, solve_with};
