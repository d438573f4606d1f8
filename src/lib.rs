//! # tsp-heuristic
//!
//! Heuristic solver for the symmetric Euclidean traveling salesman problem:
//! greedy-edge tour construction followed by long-edge-first 2-opt
//! refinement to a local optimum.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Instance, Tour, HeuristicSolution)
//! - [`distance`] — Dense distance matrix
//! - [`constructive`] — Greedy-edge construction with Union-Find cycle checks
//! - [`local_search`] — Long-edge-first 2-opt pass
//! - [`solver`] — Construction + refinement to a fixpoint, with timing
//! - [`io`] — Instance files, synthetic instance generator, CSV reports
//! - [`batch`] — Directory-wide solving with per-instance failure isolation
//!
//! ## Example
//!
//! ```
//! use tsp_heuristic::models::{Instance, Point};
//! use tsp_heuristic::solver::solve;
//!
//! let inst = Instance::from_points(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(0.0, 10.0),
//! ]).unwrap();
//!
//! let sol = solve(&inst).unwrap();
//! assert_eq!(sol.tour().nodes().len(), 5);
//! assert!((sol.objective_value() - 40.0).abs() < 1e-10);
//! ```

pub mod batch;
pub mod constructive;
pub mod distance;
mod error;
pub mod io;
pub mod local_search;
pub mod logging;
pub mod models;
pub mod solver;

pub use error::{Error, Result};
