//! Synthetic drill-board instances.
//!
//! Points model screw holes on a rectangular board: the four corner holes
//! sit at a fixed margin, and the rest are drawn uniformly inside the
//! margins, rejecting any point closer than `min_dist` to one already placed.

use std::path::{Path, PathBuf};

use log::info;
use rand::Rng;

use crate::error::{Error, Result};
use crate::models::Point;

use super::write_points;

/// Board geometry and instance-set layout for the generator.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tsp_heuristic::io::BoardGenerator;
///
/// let generator = BoardGenerator::default();
/// let mut rng = StdRng::seed_from_u64(7);
/// let points = generator.generate_points(20, &mut rng).unwrap();
/// assert_eq!(points.len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    /// Board width (mm).
    pub width: f64,
    /// Board height (mm).
    pub height: f64,
    /// Distance from the board edge to the corner holes.
    pub margin: f64,
    /// Minimum distance between any two holes.
    pub min_dist: f64,
    /// Placement attempts per point before giving up.
    pub max_attempts: usize,
    /// Node counts of the generated instances.
    pub sizes: Vec<usize>,
    /// Instances generated per node count.
    pub per_size: usize,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            margin: 5.0,
            min_dist: 3.0,
            max_attempts: 10_000,
            sizes: vec![10, 20, 30, 50, 70, 80, 100],
            per_size: 5,
        }
    }
}

impl BoardGenerator {
    /// Sets the node counts to generate.
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Sets the number of instances per node count.
    pub fn with_per_size(mut self, per_size: usize) -> Self {
        self.per_size = per_size;
        self
    }

    /// Draws `n` hole positions, corners first.
    ///
    /// # Errors
    ///
    /// [`Error::Generation`] if a point cannot be placed within
    /// `max_attempts` draws.
    pub fn generate_points<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Vec<Point>> {
        let (lo_x, hi_x) = (self.margin, self.width - self.margin);
        let (lo_y, hi_y) = (self.margin, self.height - self.margin);
        if lo_x >= hi_x || lo_y >= hi_y {
            return Err(Error::Generation(format!(
                "margin {} leaves no room on a {}x{} board",
                self.margin, self.width, self.height
            )));
        }

        let corners = [
            Point::new(lo_x, lo_y),
            Point::new(hi_x, lo_y),
            Point::new(hi_x, hi_y),
            Point::new(lo_x, hi_y),
        ];
        let mut points: Vec<Point> = corners.into_iter().take(n).collect();

        while points.len() < n {
            let placed = (0..self.max_attempts).find_map(|_| {
                let p = Point::new(rng.random_range(lo_x..hi_x), rng.random_range(lo_y..hi_y));
                points
                    .iter()
                    .all(|q| p.distance_to(q) >= self.min_dist)
                    .then_some(p)
            });
            match placed {
                Some(p) => points.push(p),
                None => {
                    return Err(Error::Generation(format!(
                        "failed to place point {} of {n}; reduce n or min_dist",
                        points.len()
                    )))
                }
            }
        }
        Ok(points)
    }

    /// Writes `instance_{n}_{k}.dat` for every configured size into `dir`.
    ///
    /// Returns the written paths in generation order.
    pub fn generate_instance_set<R: Rng>(&self, dir: &Path, rng: &mut R) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.sizes.len() * self.per_size);
        for &n in &self.sizes {
            for k in 1..=self.per_size {
                let path = dir.join(format!("instance_{n}_{k}.dat"));
                let points = self.generate_points(n, rng)?;
                write_points(&path, &points)?;
                info!("generated {}", path.display());
                written.push(path);
            }
        }
        Ok(written)
    }
}
