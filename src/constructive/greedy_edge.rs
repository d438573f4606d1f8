//! Greedy-edge tour construction.
//!
//! # Algorithm
//!
//! All node pairs are sorted by ascending cost and scanned once. An edge is
//! accepted when both endpoints still have degree < 2 and the endpoints lie
//! in different components of the partial solution (tracked with a
//! Union-Find). The scan stops after n − 1 accepted edges, which form a
//! Hamiltonian path; its two endpoints are then joined to close the cycle.
//!
//! ```text
//! sorted edges ──► degree < 2 ? ──► different components ? ──► accept
//! ```
//!
//! # Complexity
//!
//! O(n² log n), dominated by sorting the n(n−1)/2 candidate edges.
//!
//! # Reference
//!
//! Bentley, J.L. (1992). "Fast algorithms for geometric traveling salesman
//! problems", *ORSA Journal on Computing* 4(4), 387-411.

use log::debug;

use crate::error::{Error, Result};
use crate::models::{Instance, Tour};

use super::union_find::UnionFind;

/// A candidate edge `u < v` with its cost.
#[derive(Debug, Clone, Copy)]
struct Edge {
    u: usize,
    v: usize,
    weight: f64,
}

/// Builds the initial tour with the greedy-edge heuristic.
///
/// Ties between equal-cost edges are resolved by the enumeration order
/// `(0,1), (0,2), …, (1,2), …`, so the result is a pure function of the
/// cost matrix. The returned tour starts and ends at node 0.
///
/// # Errors
///
/// [`Error::ConstructionInvariant`] if the scan does not end in a single
/// Hamiltonian path. This cannot happen for a validated [`Instance`].
///
/// # Examples
///
/// ```
/// use tsp_heuristic::models::{Instance, Point};
/// use tsp_heuristic::constructive::construct_initial_tour;
///
/// let inst = Instance::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ]).unwrap();
///
/// let tour = construct_initial_tour(&inst).unwrap();
/// assert_eq!(tour.nodes().len(), 5);
/// assert!((tour.length(&inst) - 40.0).abs() < 1e-10);
/// ```
pub fn construct_initial_tour(instance: &Instance) -> Result<Tour> {
    let n = instance.n();
    let path = greedy_path(instance);

    let endpoints: Vec<usize> = (0..n).filter(|&v| path.degree[v] == 1).collect();
    if endpoints.len() != 2 {
        return Err(Error::ConstructionInvariant {
            degree_one: endpoints.len(),
        });
    }

    let mut selected = path.edges;
    selected.push((endpoints[0], endpoints[1]));

    let mut adj: Vec<Vec<usize>> = vec![Vec::with_capacity(2); n];
    for &(u, v) in &selected {
        adj[u].push(v);
        adj[v].push(u);
    }

    let seq = walk_cycle(&adj).ok_or(Error::ConstructionInvariant {
        degree_one: endpoints.len(),
    })?;

    let tour = Tour::from_closed_unchecked(seq);
    debug!(
        "greedy construction: n={n} length={:.3}",
        tour.length(instance)
    );
    Ok(tour)
}

/// Accepted path edges and the resulting node degrees.
struct GreedyPath {
    edges: Vec<(usize, usize)>,
    degree: Vec<u8>,
}

fn greedy_path(instance: &Instance) -> GreedyPath {
    let n = instance.n();

    let mut candidates = Vec::with_capacity(n * (n - 1) / 2);
    for u in 0..n {
        for v in (u + 1)..n {
            candidates.push(Edge {
                u,
                v,
                weight: instance.cost(u, v),
            });
        }
    }
    // `sort_by` is stable: equal weights keep enumeration order
    candidates.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut degree = vec![0u8; n];
    let mut components = UnionFind::new(n);
    let mut edges = Vec::with_capacity(n);

    for e in &candidates {
        if edges.len() == n - 1 {
            break;
        }
        if degree[e.u] == 2 || degree[e.v] == 2 {
            continue;
        }
        // Fewer than n - 1 edges so far: a same-component edge would close
        // a premature cycle.
        if !components.union(e.u, e.v) {
            continue;
        }
        edges.push((e.u, e.v));
        degree[e.u] += 1;
        degree[e.v] += 1;
    }

    GreedyPath { edges, degree }
}

/// Walks a 2-regular adjacency from node 0 back to node 0.
///
/// Returns `None` unless the walk is a single cycle through every node.
fn walk_cycle(adj: &[Vec<usize>]) -> Option<Vec<usize>> {
    let n = adj.len();
    let start = 0;
    let mut seq = Vec::with_capacity(n + 1);
    seq.push(start);

    let mut prev: Option<usize> = None;
    let mut curr = start;
    loop {
        let neighbors = &adj[curr];
        if neighbors.len() != 2 {
            return None;
        }
        let next = if Some(neighbors[0]) != prev {
            neighbors[0]
        } else {
            neighbors[1]
        };
        if next == start {
            break;
        }
        if seq.len() == n {
            return None;
        }
        seq.push(next);
        prev = Some(curr);
        curr = next;
    }

    if seq.len() != n {
        return None;
    }
    seq.push(start);
    Some(seq)
}
