//! Error type shared by the whole crate.

use thiserror::Error as ThisError;

/// Errors raised while building instances, constructing tours or running batches.
///
/// A 2-opt pass that finds no improving move is not an error; see
/// [`refine`](crate::local_search::refine).
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The instance violates n ≥ 2 or the cost-matrix preconditions.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
    /// A node sequence is not a closed permutation cycle.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    /// The greedy scan left a number of path endpoints other than two.
    #[error("greedy construction left {degree_one} degree-1 nodes, expected 2")]
    ConstructionInvariant { degree_one: usize },
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("instance generation failed: {0}")]
    Generation(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance(message.into())
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
