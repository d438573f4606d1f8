//! File-facing collaborators of the solver.
//!
//! - [`read_instance`] — Coordinate file → Euclidean [`Instance`](crate::models::Instance)
//! - [`BoardGenerator`] — Seeded synthetic drill-board instances
//! - [`CsvReport`] — Per-instance result rows

mod generator;
mod instance_file;
mod report;

pub use generator::BoardGenerator;
pub use instance_file::{parse_instance, parse_points, read_instance, write_points};
pub use report::{CsvReport, REPORT_HEADER};
