//! Plain-text coordinate files.
//!
//! The format is a whitespace-separated token stream: the node count `n`
//! followed by `n` coordinate pairs `x y`, conventionally one per line.
//!
//! ```text
//! 4
//! 5 5
//! 95 5
//! 95 95
//! 5 95
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Instance, Point};

/// Parses the point list of an instance file.
///
/// Tokens after the `n`-th pair are ignored.
///
/// # Errors
///
/// [`Error::InvalidInstance`] if `n <= 1`, [`Error::Parse`] if the count or a
/// coordinate is missing or not a number.
///
/// # Examples
///
/// ```
/// use tsp_heuristic::io::parse_points;
///
/// let points = parse_points("3\n0 0\n1 0\n0 1\n").unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[1].x, 1.0);
/// ```
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(k, line)| line.split_whitespace().map(move |t| (k + 1, t)));

    let (line, token) = tokens
        .next()
        .ok_or_else(|| Error::parse(1, "missing node count"))?;
    let n: i64 = token
        .parse()
        .map_err(|_| Error::parse(line, format!("invalid node count '{token}'")))?;
    if n <= 1 {
        return Err(Error::invalid_instance(format!(
            "invalid number of nodes: {n}"
        )));
    }

    let n = n as usize;
    let mut last_line = line;
    // The count is untrusted; never reserve more points than the text can hold.
    let mut points = Vec::with_capacity(n.min(text.len() / 2));
    for node in 0..n {
        let mut coord = |axis: &str| -> Result<f64> {
            let (line, token) = tokens.next().ok_or_else(|| {
                Error::parse(
                    last_line,
                    format!("expected {n} points, missing {axis} of point {node}"),
                )
            })?;
            last_line = line;
            token
                .parse()
                .map_err(|_| Error::parse(line, format!("invalid {axis} coordinate '{token}'")))
        };
        let x = coord("x")?;
        let y = coord("y")?;
        points.push(Point::new(x, y));
    }
    Ok(points)
}

/// Parses an instance file's contents into a Euclidean [`Instance`].
pub fn parse_instance(text: &str) -> Result<Instance> {
    Instance::from_points(&parse_points(text)?)
}

/// Reads and parses the instance file at `path`.
pub fn read_instance(path: &Path) -> Result<Instance> {
    let text = std::fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Writes `points` in the instance file format.
pub fn write_points(path: &Path, points: &[Point]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", points.len())?;
    for p in points {
        writeln!(out, "{} {}", p.x, p.y)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square() {
        let inst = parse_instance("4\n0 0\n10 0\n10 10\n0 10\n").unwrap();
        assert_eq!(inst.n(), 4);
        assert!((inst.cost(0, 2) - 200f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_parse_free_layout() {
        let points = parse_points("  3 0.5 1.5\n\n2e1 -3   4 4 trailing").unwrap();
        assert_eq!(
            points,
            vec![Point::new(0.5, 1.5), Point::new(20.0, -3.0), Point::new(4.0, 4.0)]
        );
    }

    #[test]
    fn test_rejects_small_n() {
        assert!(matches!(
            parse_points("1\n0 0\n").unwrap_err(),
            Error::InvalidInstance(_)
        ));
        assert!(matches!(
            parse_points("-4\n").unwrap_err(),
            Error::InvalidInstance(_)
        ));
    }

    #[test]
    fn test_missing_count() {
        assert!(matches!(
            parse_points("   \n").unwrap_err(),
            Error::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_bad_count() {
        assert!(matches!(
            parse_points("four\n").unwrap_err(),
            Error::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_huge_count_without_points() {
        let err = parse_points("1000000000000\n0 0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_missing_coordinate_reports_line() {
        let err = parse_points("3\n0 0\n1 1\n2\n").unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("missing y of point 2"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_bad_coordinate_reports_line() {
        let err = parse_points("2\n0 0\n1 x\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instance_3_1.dat");
        let points = vec![Point::new(5.0, 5.0), Point::new(95.25, 5.0), Point::new(0.1, 7.3)];
        write_points(&path, &points).unwrap();
        let inst = read_instance(&path).unwrap();
        assert_eq!(inst.n(), 3);
        assert_eq!(parse_points(&std::fs::read_to_string(&path).unwrap()).unwrap(), points);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_instance(&dir.path().join("nope.dat")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
