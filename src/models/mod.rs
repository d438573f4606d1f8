//! Domain model types for the symmetric TSP.
//!
//! Provides planar points, validated instances over a cost matrix, closed
//! tours, and the immutable summary returned by a heuristic solve.

mod instance;
mod point;
mod solution;
mod tour;

pub use instance::{Instance, SYMMETRY_TOLERANCE};
pub use point::Point;
pub use solution::HeuristicSolution;
pub use tour::Tour;
