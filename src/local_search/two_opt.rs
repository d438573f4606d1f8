//! Long-edge-first 2-opt refinement.
//!
//! # Algorithm
//!
//! Every tour edge `(t[i-1], t[i])` with `1 <= i <= n-2` is a candidate first
//! cut. Cuts are visited in descending order of edge length, and for each cut
//! `i` every second cut `j` in `i+1..=n-1` is tried by reversing `t[i..=j]`:
//!
//! ```text
//! before: ... t[i-1] → t[i] → ... → t[j] → t[j+1] ...
//! after:  ... t[i-1] → t[j] → ... → t[i] → t[j+1] ...
//! ```
//!
//! The first reversal that shortens the tour is accepted and the pass ends;
//! the caller restarts the pass on the new tour until none improves.
//!
//! # Complexity
//!
//! O(n²) candidates per pass, each O(1) with [`MoveEvaluation::Delta`] or
//! O(n) with [`MoveEvaluation::FullRecompute`].
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{Instance, Tour};

/// Minimum relative length reduction for a move to count as an improvement.
///
/// Filters out floating-point noise, e.g. reversing the whole path yields the
/// same cycle but may sum to a length one ulp shorter.
pub const IMPROVEMENT_EPSILON: f64 = 1e-12;

/// Smallest gain accepted on a tour of the given length.
///
/// Scales with the tour so that instances with tiny costs still improve.
///
/// ```
/// use tsp_heuristic::local_search::{improvement_threshold, IMPROVEMENT_EPSILON};
///
/// assert_eq!(improvement_threshold(100.0), 100.0 * IMPROVEMENT_EPSILON);
/// assert!(improvement_threshold(0.0) > 0.0);
/// ```
pub fn improvement_threshold(length: f64) -> f64 {
    IMPROVEMENT_EPSILON * length.max(f64::MIN_POSITIVE)
}

/// How a candidate reversal is priced.
///
/// Both strategies explore moves in the same order and accept the same first
/// improving move; `Delta` only looks at the four edges that change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveEvaluation {
    /// Four-edge cost difference, O(1) per candidate.
    #[default]
    Delta,
    /// Copy the tour, reverse the segment and sum every edge, O(n) per candidate.
    FullRecompute,
}

impl FromStr for MoveEvaluation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delta" => Ok(Self::Delta),
            "full" | "full_recompute" => Ok(Self::FullRecompute),
            other => Err(Error::other(format!(
                "unknown move evaluation '{other}' (expected 'delta' or 'full')"
            ))),
        }
    }
}

impl fmt::Display for MoveEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => f.write_str("delta"),
            Self::FullRecompute => f.write_str("full"),
        }
    }
}

/// An accepted 2-opt move: positions `i..=j` reversed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TwoOptMove {
    i: usize,
    j: usize,
    gain: f64,
}

/// Runs one long-edge-first 2-opt pass with [`MoveEvaluation::Delta`].
///
/// Returns the new tour and `true` if an improving move was applied, or an
/// unchanged copy and `false` if the tour is a local optimum under this
/// neighbourhood.
///
/// # Examples
///
/// ```
/// use tsp_heuristic::models::{Instance, Point, Tour};
/// use tsp_heuristic::local_search::refine;
///
/// // Visiting order 0 → 1 → 2 → 3 crosses both diagonals.
/// let inst = Instance::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(10.0, 0.0),
///     Point::new(0.0, 10.0),
/// ]).unwrap();
/// let crossed = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
///
/// let (better, improved) = refine(&inst, &crossed);
/// assert!(improved);
/// assert!((better.length(&inst) - 40.0).abs() < 1e-10);
///
/// let (same, improved) = refine(&inst, &better);
/// assert!(!improved);
/// assert_eq!(same, better);
/// ```
pub fn refine(instance: &Instance, tour: &Tour) -> (Tour, bool) {
    refine_with(instance, tour, MoveEvaluation::default())
}

/// Runs one long-edge-first 2-opt pass with the given evaluation strategy.
///
/// # Panics
///
/// `tour` must visit exactly the nodes of `instance`. A tour over more nodes
/// panics on an out-of-range cost lookup; debug builds also reject a tour
/// over fewer nodes.
pub fn refine_with(instance: &Instance, tour: &Tour, evaluation: MoveEvaluation) -> (Tour, bool) {
    debug_assert!(
        tour.check_against(instance).is_ok(),
        "tour over {} nodes does not match instance of size {}",
        tour.num_nodes(),
        instance.n()
    );
    let found = match evaluation {
        MoveEvaluation::Delta => first_improving_delta(instance, tour),
        MoveEvaluation::FullRecompute => first_improving_full(instance, tour),
    };

    match found {
        Some(mv) => {
            debug!(
                "2-opt: reversed positions {}..={} gain={:.6}",
                mv.i, mv.j, mv.gain
            );
            (tour.with_reversed(mv.i, mv.j), true)
        }
        None => (tour.clone(), false),
    }
}

/// Cut positions `1..=n-2`, longest removed edge first.
///
/// Equal lengths keep ascending position order.
fn cuts_longest_first(instance: &Instance, seq: &[usize]) -> Vec<usize> {
    let n = seq.len() - 1;
    let mut cuts: Vec<(usize, f64)> = (1..n - 1)
        .map(|i| (i, instance.cost(seq[i - 1], seq[i])))
        .collect();
    cuts.sort_by(|a, b| b.1.total_cmp(&a.1));
    cuts.into_iter().map(|(i, _)| i).collect()
}

/// Length change from reversing `seq[i..=j]` in a closed tour.
///
/// Valid for symmetric costs, where the reversed segment's interior keeps
/// its length.
fn two_opt_delta(instance: &Instance, seq: &[usize], i: usize, j: usize) -> f64 {
    let before = seq[i - 1];
    let after = seq[j + 1];
    instance.cost(before, seq[j]) + instance.cost(seq[i], after)
        - instance.cost(before, seq[i])
        - instance.cost(seq[j], after)
}

fn first_improving_delta(instance: &Instance, tour: &Tour) -> Option<TwoOptMove> {
    let seq = tour.nodes();
    let n = tour.num_nodes();
    let threshold = improvement_threshold(instance.tour_length(seq));
    for i in cuts_longest_first(instance, seq) {
        for j in (i + 1)..n {
            let delta = two_opt_delta(instance, seq, i, j);
            if delta < -threshold {
                return Some(TwoOptMove { i, j, gain: -delta });
            }
        }
    }
    None
}

fn first_improving_full(instance: &Instance, tour: &Tour) -> Option<TwoOptMove> {
    let seq = tour.nodes();
    let n = tour.num_nodes();
    let current = instance.tour_length(seq);
    let threshold = improvement_threshold(current);
    let mut candidate = seq.to_vec();
    for i in cuts_longest_first(instance, seq) {
        for j in (i + 1)..n {
            candidate.copy_from_slice(seq);
            candidate[i..=j].reverse();
            let length = instance.tour_length(&candidate);
            if length < current - threshold {
                return Some(TwoOptMove {
                    i,
                    j,
                    gain: current - length,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const MODES: [MoveEvaluation; 2] = [MoveEvaluation::Delta, MoveEvaluation::FullRecompute];

    fn square() -> Instance {
        Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap()
    }

    fn crossed_square() -> Instance {
        Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap()
    }

    fn random_instance(n: usize, seed: u64) -> Instance {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        Instance::from_points(&points).unwrap()
    }

    #[test]
    fn test_perimeter_is_local_optimum() {
        let inst = square();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        for mode in MODES {
            let (next, improved) = refine_with(&inst, &tour, mode);
            assert!(!improved, "{mode} found a move on the perimeter");
            assert_eq!(next, tour);
        }
    }

    #[test]
    fn test_uncrosses_diagonals() {
        let inst = crossed_square();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        assert!((tour.length(&inst) - (20.0 + 2.0 * 200f64.sqrt())).abs() < 1e-10);
        for mode in MODES {
            let (next, improved) = refine_with(&inst, &tour, mode);
            assert!(improved);
            assert_eq!(next.nodes(), &[0, 2, 1, 3, 0]);
            assert!((next.length(&inst) - 40.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_uncrosses_tiny_scale() {
        let scale = 1e-10;
        let inst = Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0 * scale, 10.0 * scale),
            Point::new(10.0 * scale, 0.0),
            Point::new(0.0, 10.0 * scale),
        ])
        .unwrap();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        for mode in MODES {
            let (next, improved) = refine_with(&inst, &tour, mode);
            assert!(improved, "{mode} missed the uncrossing move");
            assert_eq!(next.nodes(), &[0, 2, 1, 3, 0]);
            assert!((next.length(&inst) - 40.0 * scale).abs() < 1e-20);
        }
    }

    #[test]
    fn test_zero_cost_tour_is_local_optimum() {
        let inst = Instance::from_rows(&vec![vec![0.0; 4]; 4]).unwrap();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        for mode in MODES {
            assert!(!refine_with(&inst, &tour, mode).1);
        }
    }

    #[test]
    #[should_panic]
    fn test_tour_larger_than_instance_panics() {
        let tour = Tour::from_order(vec![0, 1, 2, 3, 4]).unwrap();
        refine(&square(), &tour);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not match instance")]
    fn test_tour_smaller_than_instance_panics() {
        let tour = Tour::from_order(vec![0, 1, 2]).unwrap();
        refine(&square(), &tour);
    }

    #[test]
    fn test_two_nodes_noop() {
        let inst = Instance::from_points(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap();
        let tour = Tour::from_order(vec![0, 1]).unwrap();
        assert!(cuts_longest_first(&inst, tour.nodes()).is_empty());
        for mode in MODES {
            let (next, improved) = refine_with(&inst, &tour, mode);
            assert!(!improved);
            assert_eq!(next.nodes(), &[0, 1, 0]);
        }
    }

    #[test]
    fn test_three_nodes_noop() {
        let inst = Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(1.0, 3.0),
        ])
        .unwrap();
        let tour = Tour::from_order(vec![0, 1, 2]).unwrap();
        for mode in MODES {
            assert!(!refine_with(&inst, &tour, mode).1);
        }
    }

    #[test]
    fn test_cuts_sorted_longest_first() {
        let points: Vec<Point> = [0.0, 1.0, 4.0, 6.0, 7.0]
            .iter()
            .map(|&x| Point::new(x, 0.0))
            .collect();
        let inst = Instance::from_points(&points).unwrap();
        let tour = Tour::from_order(vec![0, 1, 2, 3, 4]).unwrap();
        // Edges ending at positions 1..=3 have lengths 1, 3, 2.
        assert_eq!(cuts_longest_first(&inst, tour.nodes()), vec![2, 3, 1]);
    }

    #[test]
    fn test_cuts_ties_keep_position_order() {
        let inst = square();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(cuts_longest_first(&inst, tour.nodes()), vec![1, 2]);
    }

    #[test]
    fn test_delta_matches_recomputation() {
        let inst = random_instance(12, 3);
        let tour = Tour::from_order((0..12).collect()).unwrap();
        let base = tour.length(&inst);
        for i in 1..11 {
            for j in (i + 1)..12 {
                let recomputed = tour.with_reversed(i, j).length(&inst) - base;
                let delta = two_opt_delta(&inst, tour.nodes(), i, j);
                assert!((recomputed - delta).abs() < 1e-9, "i={i} j={j}");
            }
        }
    }

    #[test]
    fn test_modes_accept_same_moves() {
        for seed in 0..5 {
            let inst = random_instance(30, seed);
            let mut delta_tour = Tour::from_order((0..30).collect()).unwrap();
            let mut full_tour = delta_tour.clone();
            loop {
                let (d, d_improved) = refine_with(&inst, &delta_tour, MoveEvaluation::Delta);
                let (f, f_improved) =
                    refine_with(&inst, &full_tour, MoveEvaluation::FullRecompute);
                assert_eq!(d_improved, f_improved, "seed {seed}");
                assert_eq!(d, f, "seed {seed}");
                if !d_improved {
                    break;
                }
                delta_tour = d;
                full_tour = f;
            }
        }
    }

    #[test]
    fn test_improvement_is_strict() {
        let inst = random_instance(20, 11);
        let mut tour = Tour::from_order((0..20).collect()).unwrap();
        loop {
            let before = tour.length(&inst);
            let (next, improved) = refine(&inst, &tour);
            if !improved {
                assert_eq!(next, tour);
                break;
            }
            assert!(next.length(&inst) < before);
            tour = next;
        }
    }

    #[test]
    fn test_parse_evaluation() {
        assert_eq!("delta".parse::<MoveEvaluation>().unwrap(), MoveEvaluation::Delta);
        assert_eq!(
            "full".parse::<MoveEvaluation>().unwrap(),
            MoveEvaluation::FullRecompute
        );
        assert!("fast".parse::<MoveEvaluation>().is_err());
        assert_eq!(MoveEvaluation::FullRecompute.to_string(), "full");
    }
}
