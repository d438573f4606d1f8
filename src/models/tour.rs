//! Closed tour type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Instance;

/// A closed Hamiltonian cycle stored as `n + 1` node ids.
///
/// The first and last entries are equal and the first `n` entries are a
/// permutation of `0..n`. Every public constructor checks this, so a
/// `Tour` value is always a valid cycle.
///
/// # Examples
///
/// ```
/// use tsp_heuristic::models::Tour;
///
/// let tour = Tour::from_order(vec![0, 2, 1, 3]).unwrap();
/// assert_eq!(tour.nodes(), &[0, 2, 1, 3, 0]);
/// assert_eq!(tour.num_nodes(), 4);
/// assert_eq!(tour.to_string(), "0-2-1-3-0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour {
    seq: Vec<usize>,
}

impl Tour {
    /// Wraps a closed sequence (`first == last`) over nodes `0..n`.
    pub fn from_closed(seq: Vec<usize>, n: usize) -> Result<Self> {
        check_closed(&seq, n)?;
        Ok(Self { seq })
    }

    /// Closes a visiting order of all nodes `0..order.len()` into a tour.
    pub fn from_order(mut order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let first = *order
            .first()
            .ok_or_else(|| Error::invalid_tour("empty visiting order"))?;
        order.push(first);
        Self::from_closed(order, n)
    }

    /// Wraps a sequence the caller has already proven to be a closed cycle.
    pub(crate) fn from_closed_unchecked(seq: Vec<usize>) -> Self {
        debug_assert!(check_closed(&seq, seq.len().saturating_sub(1)).is_ok());
        Self { seq }
    }

    /// The closed node sequence, `n + 1` entries long.
    pub fn nodes(&self) -> &[usize] {
        &self.seq
    }

    /// Number of distinct nodes visited.
    pub fn num_nodes(&self) -> usize {
        self.seq.len() - 1
    }

    /// Total length of the cycle under the instance's costs.
    pub fn length(&self, instance: &Instance) -> f64 {
        instance.tour_length(&self.seq)
    }

    /// Returns a copy with positions `i..=j` reversed (a 2-opt move).
    ///
    /// The caller keeps `1 <= i < j <= n - 1` so both endpoints stay fixed.
    pub fn with_reversed(&self, i: usize, j: usize) -> Self {
        let mut seq = self.seq.clone();
        seq[i..=j].reverse();
        Self { seq }
    }

    /// Checks that the tour covers exactly the nodes of `instance`.
    pub fn check_against(&self, instance: &Instance) -> Result<()> {
        check_closed(&self.seq, instance.n())
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.seq
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.seq.iter().enumerate() {
            if k > 0 {
                f.write_str("-")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = Error;

    fn try_from(seq: Vec<usize>) -> Result<Self> {
        let n = seq.len().saturating_sub(1);
        Self::from_closed(seq, n)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.seq
    }
}

fn check_closed(seq: &[usize], n: usize) -> Result<()> {
    if n < 2 {
        return Err(Error::invalid_tour(format!("need at least 2 nodes, got {n}")));
    }
    if seq.len() != n + 1 {
        return Err(Error::invalid_tour(format!(
            "expected {} entries for {n} nodes, got {}",
            n + 1,
            seq.len()
        )));
    }
    if seq[0] != seq[n] {
        return Err(Error::invalid_tour(format!(
            "tour starts at {} but ends at {}",
            seq[0], seq[n]
        )));
    }
    let mut seen = vec![false; n];
    for &v in &seq[..n] {
        if v >= n {
            return Err(Error::invalid_tour(format!("node {v} out of range 0..{n}")));
        }
        if seen[v] {
            return Err(Error::invalid_tour(format!("node {v} visited twice")));
        }
        seen[v] = true;
    }
    Ok(())
}
