//! Local search operators for improving tours.
//!
//! - [`refine`] — One long-edge-first 2-opt pass, first improvement

mod two_opt;

pub use two_opt::{improvement_threshold, refine, refine_with, MoveEvaluation, IMPROVEMENT_EPSILON};
