//! Constructive heuristics for building the initial tour.
//!
//! - [`construct_initial_tour`] — Greedy-edge selection with degree and cycle
//!   checks (Union-Find), O(n² log n)

mod greedy_edge;
mod union_find;

pub use greedy_edge::construct_initial_tour;
