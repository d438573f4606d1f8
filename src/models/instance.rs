//! TSP instance: node count plus a validated cost matrix.

use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

use super::Point;

/// Tolerance used when checking matrix symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// An immutable symmetric TSP instance.
///
/// Construction validates the preconditions the solver relies on: at least
/// two nodes, finite non-negative costs, a zero diagonal and symmetry.
/// Nothing in the crate mutates an instance once built, so it can be shared
/// by reference across concurrent solves.
///
/// # Examples
///
/// ```
/// use tsp_heuristic::models::{Instance, Point};
///
/// let inst = Instance::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
/// ]).unwrap();
/// assert_eq!(inst.n(), 2);
/// assert!((inst.cost(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    cost: DistanceMatrix,
}

impl Instance {
    /// Wraps a cost matrix after checking the instance preconditions.
    pub fn new(cost: DistanceMatrix) -> Result<Self> {
        let n = cost.size();
        if n < 2 {
            return Err(Error::invalid_instance(format!(
                "need at least 2 nodes, got {n}"
            )));
        }
        if let Some((i, j, d)) = cost.first_invalid_entry() {
            return Err(Error::invalid_instance(format!(
                "cost[{i}][{j}] = {d} is not a finite non-negative number"
            )));
        }
        if let Some(i) = (0..n).find(|&i| cost.get(i, i) != 0.0) {
            return Err(Error::invalid_instance(format!(
                "cost[{i}][{i}] must be zero"
            )));
        }
        if !cost.is_symmetric(SYMMETRY_TOLERANCE) {
            return Err(Error::invalid_instance("cost matrix is not symmetric"));
        }
        Ok(Self { cost })
    }

    /// Builds the Euclidean instance over the given points.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        if let Some(k) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::invalid_instance(format!(
                "point {k} has non-finite coordinates"
            )));
        }
        Self::new(DistanceMatrix::from_points(points))
    }

    /// Builds an instance from nested rows of an explicit cost matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cost = DistanceMatrix::from_rows(rows)
            .ok_or_else(|| Error::invalid_instance("cost matrix is not square"))?;
        Self::new(cost)
    }

    /// Number of nodes.
    pub fn n(&self) -> usize {
        self.cost.size()
    }

    /// Cost of travelling between nodes `i` and `j`.
    pub fn cost(&self, i: usize, j: usize) -> f64 {
        self.cost.get(i, j)
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.cost
    }

    /// Sum of consecutive edge costs over a node sequence.
    ///
    /// For a closed tour (first == last) this is the full cycle length.
    pub fn tour_length(&self, seq: &[usize]) -> f64 {
        seq.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Instance {
        Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .expect("valid square")
    }

    #[test]
    fn test_square_lengths() {
        let inst = square();
        assert_eq!(inst.n(), 4);
        assert!((inst.tour_length(&[0, 1, 2, 3, 0]) - 40.0).abs() < 1e-10);
        assert!((inst.tour_length(&[0, 2, 1, 3, 0]) - (20.0 + 2.0 * 200f64.sqrt())).abs() < 1e-10);
    }

    #[test]
    fn test_tour_length_degenerate() {
        let inst = square();
        assert_eq!(inst.tour_length(&[]), 0.0);
        assert_eq!(inst.tour_length(&[2]), 0.0);
    }

    #[test]
    fn test_rejects_single_node() {
        let err = Instance::from_points(&[Point::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Instance::from_points(&[]).is_err());
    }

    #[test]
    fn test_rejects_non_square_rows() {
        let err = Instance::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_rejects_asymmetric() {
        let err = Instance::from_rows(&[vec![0.0, 1.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(err.to_string().contains("symmetric"));
    }

    #[test]
    fn test_rejects_negative() {
        let err = Instance::from_rows(&[vec![0.0, -1.0], vec![-1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_rejects_nonzero_diagonal() {
        let err = Instance::from_rows(&[vec![1.0, 2.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(err.to_string().contains("zero"));
    }

    #[test]
    fn test_rejects_nan_point() {
        let err = Instance::from_points(&[Point::new(0.0, 0.0), Point::new(f64::NAN, 0.0)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Instance>();
    }
}
