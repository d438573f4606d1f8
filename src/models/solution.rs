//! Heuristic solve result.

use std::time::Duration;

use serde::{Serialize, Serializer};

use super::{Instance, Tour};

/// Immutable outcome of a heuristic solve.
///
/// The objective value is computed from the final tour when the result is
/// built; the tour cannot be changed afterwards, so the two never disagree.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tsp_heuristic::models::{HeuristicSolution, Instance, Point, Tour};
///
/// let inst = Instance::from_points(&[Point::new(0.0, 0.0), Point::new(0.0, 2.0)]).unwrap();
/// let tour = Tour::from_order(vec![0, 1]).unwrap();
/// let sol = HeuristicSolution::new(&inst, tour, Duration::from_millis(3), 0, true);
/// assert!((sol.objective_value() - 4.0).abs() < 1e-10);
/// assert!(sol.converged());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HeuristicSolution {
    tour: Tour,
    #[serde(rename = "obj_value")]
    objective_value: f64,
    #[serde(rename = "solving_time", serialize_with = "serialize_secs")]
    elapsed: Duration,
    moves: usize,
    converged: bool,
}

impl HeuristicSolution {
    /// Builds the summary for `tour`, computing its length under `instance`.
    pub fn new(
        instance: &Instance,
        tour: Tour,
        elapsed: Duration,
        moves: usize,
        converged: bool,
    ) -> Self {
        let objective_value = tour.length(instance);
        Self {
            tour,
            objective_value,
            elapsed,
            moves,
            converged,
        }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Total length of the final tour.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Wall-clock time for construction plus refinement.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of accepted 2-opt moves.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// `false` only when a time limit stopped refinement early.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn into_tour(self) -> Tour {
        self.tour
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    #[test]
    fn test_objective_from_tour() {
        let inst = Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        let sol = HeuristicSolution::new(&inst, tour, Duration::from_secs(1), 2, true);
        assert!((sol.objective_value() - 40.0).abs() < 1e-10);
        assert_eq!(sol.moves(), 2);
        assert_eq!(sol.elapsed(), Duration::from_secs(1));
        assert_eq!(sol.into_tour().nodes(), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_serialize() {
        let inst = Instance::from_points(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap();
        let tour = Tour::from_order(vec![0, 1]).unwrap();
        let sol = HeuristicSolution::new(&inst, tour, Duration::from_millis(500), 0, false);
        let v = serde_json::to_value(&sol).unwrap();
        assert_eq!(v["tour"], serde_json::json!([0, 1, 0]));
        assert_eq!(v["obj_value"], serde_json::json!(2.0));
        assert_eq!(v["solving_time"], serde_json::json!(0.5));
        assert_eq!(v["converged"], serde_json::json!(false));
    }
}
