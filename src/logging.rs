//! Logger setup for the command-line front end.

use std::io::Write;

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};

use crate::Result;

/// Installs a compact `LEVEL message` logger on stderr.
///
/// Fails if a global logger is already installed.
pub fn init_logger(level: LevelFilter, timestamp: bool) -> Result<()> {
    Builder::new()
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        })
        .target(Target::Stderr)
        .try_init()
        .map_err(|e| crate::Error::other(format!("logger init failed: {e}")))
}

/// Parses a `--log-level` value.
pub fn parse_level(s: &str) -> Result<LevelFilter> {
    s.parse()
        .map_err(|_| crate::Error::other(format!("unknown log level '{s}'")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
