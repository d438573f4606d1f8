//! Heuristic solver configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::local_search::MoveEvaluation;

/// Configuration for [`solve_with`](super::solve_with).
///
/// The default reproduces the plain heuristic: delta move evaluation and no
/// time limit, so refinement always runs to the 2-opt fixpoint.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tsp_heuristic::local_search::MoveEvaluation;
/// use tsp_heuristic::solver::HeuristicConfig;
///
/// let config = HeuristicConfig::default()
///     .with_evaluation(MoveEvaluation::FullRecompute)
///     .with_time_limit(Duration::from_secs(5));
/// assert_eq!(config.evaluation, MoveEvaluation::FullRecompute);
/// assert_eq!(config.time_limit, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// How candidate 2-opt moves are priced.
    pub evaluation: MoveEvaluation,
    /// Stop refining at the first round boundary past this budget.
    #[serde(
        rename = "time_limit_secs",
        serialize_with = "serialize_opt_secs",
        deserialize_with = "deserialize_opt_secs"
    )]
    pub time_limit: Option<Duration>,
}

impl HeuristicConfig {
    /// Sets the move evaluation strategy.
    pub fn with_evaluation(mut self, evaluation: MoveEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Sets a wall-clock budget for construction plus refinement.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Loads a configuration from a JSON file; missing fields keep defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| crate::Error::other(format!("invalid solver config: {e}")))
    }
}

fn serialize_opt_secs<S: Serializer>(
    d: &Option<Duration>,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    match d {
        Some(d) => s.serialize_some(&d.as_secs_f64()),
        None => s.serialize_none(),
    }
}

fn deserialize_opt_secs<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<Duration>, D::Error> {
    let secs: Option<f64> = Option::deserialize(d)?;
    secs.map(|s| {
        Duration::try_from_secs_f64(s)
            .map_err(|e| serde::de::Error::custom(format!("time limit {s}: {e}")))
    })
    .transpose()
}
