//! CSV result report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::HeuristicSolution;

/// Column header written once at the top of every report.
pub const REPORT_HEADER: &str = "instance,n,obj_value,solving_time,tour";

/// Appends one row per solved instance, flushing after each row so a
/// partially completed batch still leaves a readable report.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tsp_heuristic::io::CsvReport;
/// use tsp_heuristic::models::{HeuristicSolution, Instance, Point, Tour};
///
/// let inst = Instance::from_points(&[Point::new(0.0, 0.0), Point::new(0.0, 1.0)]).unwrap();
/// let sol = HeuristicSolution::new(
///     &inst,
///     Tour::from_order(vec![0, 1]).unwrap(),
///     Duration::from_millis(250),
///     0,
///     true,
/// );
///
/// let mut report = CsvReport::new(Vec::new()).unwrap();
/// report.append("instance_2_1.dat", 2, &sol).unwrap();
/// let text = String::from_utf8(report.into_inner()).unwrap();
/// assert_eq!(text, "instance,n,obj_value,solving_time,tour\ninstance_2_1.dat,2,2,0.25,0-1-0\n");
/// ```
pub struct CsvReport<W: Write> {
    out: W,
    rows: usize,
}

impl CsvReport<BufWriter<File>> {
    /// Creates (or truncates) the report file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> CsvReport<W> {
    /// Wraps a writer and emits the header row.
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{REPORT_HEADER}")?;
        out.flush()?;
        Ok(Self { out, rows: 0 })
    }

    /// Writes the row for one instance.
    pub fn append(
        &mut self,
        instance: &str,
        n: usize,
        solution: &HeuristicSolution,
    ) -> Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{}",
            instance,
            n,
            solution.objective_value(),
            solution.elapsed().as_secs_f64(),
            solution.tour()
        )?;
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Instance, Point, Tour};
    use std::time::Duration;

    fn square_solution() -> (Instance, HeuristicSolution) {
        let inst = Instance::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        let tour = Tour::from_order(vec![0, 1, 2, 3]).unwrap();
        let sol = HeuristicSolution::new(&inst, tour, Duration::from_secs(2), 0, true);
        (inst, sol)
    }

    #[test]
    fn test_header_only() {
        let report = CsvReport::new(Vec::new()).unwrap();
        assert_eq!(report.rows(), 0);
        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(text, format!("{REPORT_HEADER}\n"));
    }

    #[test]
    fn test_rows() {
        let (inst, sol) = square_solution();
        let mut report = CsvReport::new(Vec::new()).unwrap();
        report.append("a.dat", inst.n(), &sol).unwrap();
        report.append("b.dat", inst.n(), &sol).unwrap();
        assert_eq!(report.rows(), 2);
        let text = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "a.dat,4,40,2,0-1-2-3-0");
        assert!(lines[2].starts_with("b.dat,4,"));
    }

    #[test]
    fn test_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results_all.csv");
        let (inst, sol) = square_solution();
        let mut report = CsvReport::create(&path).unwrap();
        report.append("square.dat", inst.n(), &sol).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("instance,n,obj_value,solving_time,tour"));
        assert!(content.contains("square.dat,4,40,2,0-1-2-3-0"));
    }
}
