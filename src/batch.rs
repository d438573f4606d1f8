//! Batch solving over a directory of instance files.
//!
//! Each `.dat` file is read and solved on its own; a file that cannot be read
//! or solved is logged and skipped so the rest of the batch still runs.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::error::Result;
use crate::io::{read_instance, CsvReport};
use crate::solver::{solve_with, HeuristicConfig};

/// Filter value that selects every instance.
pub const ALL_INSTANCES: &str = "all";

/// Where to read instances, where to write the report, and what to solve.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `"all"` or a node count `s`, selecting files named `instance_{s}_*`.
    pub filter: String,
    pub config: HeuristicConfig,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            output_dir: PathBuf::from("./data/solution"),
            filter: ALL_INSTANCES.to_string(),
            config: HeuristicConfig::default(),
        }
    }
}

impl BatchOptions {
    /// Path of the CSV report, `results_{filter}.csv` in the output directory.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(format!("results_{}.csv", self.filter))
    }
}

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Instances solved and written to the report.
    pub solved: usize,
    /// Instances whose file could not be read or parsed.
    pub skipped: usize,
    /// Instances whose solve failed.
    pub failed: usize,
}

/// Returns `true` if `file_name` is selected by `filter`.
///
/// # Examples
///
/// ```
/// use tsp_heuristic::batch::matches_filter;
///
/// assert!(matches_filter("instance_10_3.dat", "all"));
/// assert!(matches_filter("instance_10_3.dat", "10"));
/// assert!(!matches_filter("instance_100_3.dat", "10"));
/// ```
pub fn matches_filter(file_name: &str, filter: &str) -> bool {
    filter == ALL_INSTANCES || file_name.contains(&format!("instance_{filter}_"))
}

/// Lists the regular `.dat` files in `dir` selected by `filter`, sorted by name.
pub fn collect_instance_files(dir: &Path, filter: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("dat") {
            continue;
        }
        let selected = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| matches_filter(n, filter));
        if selected {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Solves every selected instance and writes one report row per success.
///
/// # Errors
///
/// Only failures that affect the whole batch: an unreadable data directory or
/// an unwritable report.
pub fn run_batch(options: &BatchOptions) -> Result<BatchSummary> {
    let files = collect_instance_files(&options.data_dir, &options.filter)?;
    std::fs::create_dir_all(&options.output_dir)?;
    let report_path = options.report_path();
    let mut report = CsvReport::create(&report_path)?;

    let mut summary = BatchSummary::default();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("processing instance: {name}");

        let instance = match read_instance(path) {
            Ok(instance) => instance,
            Err(e) => {
                warn!("error reading instance {name}: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        let solution = match solve_with(&instance, &options.config) {
            Ok(solution) => solution,
            Err(e) => {
                error!("error solving instance {name}: {e}");
                summary.failed += 1;
                continue;
            }
        };

        info!(
            "  feasible solution found with obj_value {} in {:.6}s",
            solution.objective_value(),
            solution.elapsed().as_secs_f64()
        );
        info!("  tour: {}", solution.tour());
        report.append(&name, instance.n(), &solution)?;
        summary.solved += 1;
    }

    info!(
        "batch finished: solved={} skipped={} failed={} report={}",
        summary.solved,
        summary.skipped,
        summary.failed,
        report_path.display()
    );
    Ok(summary)
}
