//! Greedy construction followed by 2-opt refinement to a fixpoint.

use std::time::Instant;

use log::{debug, info};

use crate::constructive::construct_initial_tour;
use crate::error::Result;
use crate::local_search::refine_with;
use crate::models::{HeuristicSolution, Instance};

use super::HeuristicConfig;

/// Solves `instance` with the default configuration.
///
/// Builds the greedy-edge tour once, then repeats long-edge-first 2-opt
/// passes until one finds no improving move. Elapsed time covers both phases.
///
/// # Errors
///
/// Propagates [`Error::ConstructionInvariant`](crate::Error::ConstructionInvariant)
/// from construction; refinement itself cannot fail.
///
/// # Examples
///
/// ```
/// use tsp_heuristic::models::{Instance, Point};
/// use tsp_heuristic::solver::solve;
///
/// let inst = Instance::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ]).unwrap();
///
/// let sol = solve(&inst).unwrap();
/// assert!((sol.objective_value() - 40.0).abs() < 1e-10);
/// assert_eq!(sol.moves(), 0);
/// assert!(sol.converged());
/// ```
pub fn solve(instance: &Instance) -> Result<HeuristicSolution> {
    solve_with(instance, &HeuristicConfig::default())
}

/// Solves `instance` with an explicit configuration.
///
/// With a time limit, the deadline is checked before every 2-opt pass; once
/// it has passed, the last accepted tour is returned with
/// [`converged`](HeuristicSolution::converged) set to `false`.
pub fn solve_with(instance: &Instance, config: &HeuristicConfig) -> Result<HeuristicSolution> {
    let start = Instant::now();
    let deadline = config.time_limit.map(|limit| start + limit);

    let mut tour = construct_initial_tour(instance)?;
    let initial_length = tour.length(instance);

    let mut moves = 0;
    let mut converged = true;
    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            converged = false;
            debug!("time limit reached after {moves} moves");
            break;
        }
        let (next, improved) = refine_with(instance, &tour, config.evaluation);
        if !improved {
            break;
        }
        tour = next;
        moves += 1;
    }

    let solution = HeuristicSolution::new(instance, tour, start.elapsed(), moves, converged);
    info!(
        "heuristic: n={} initial={:.3} final={:.3} moves={} time={:.6}s converged={}",
        instance.n(),
        initial_length,
        solution.objective_value(),
        moves,
        solution.elapsed().as_secs_f64(),
        converged
    );
    Ok(solution)
}
