//! Error types for tree comparison.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which of the two trees a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Expected => f.write_str("expected"),
            Side::Actual => f.write_str("actual"),
        }
    }
}

/// A file could not be opened on one side. Recorded per file; the rest of the
/// tree is still compared.
#[derive(Debug, thiserror::Error)]
#[error("{side}: {source}")]
pub struct OpenError {
    pub side: Side,
    #[source]
    pub source: io::Error,
}

/// The expected tree could not be enumerated.
#[derive(Debug, thiserror::Error)]
#[error("failed to walk {root:?}: {source}")]
pub struct TraversalError {
    pub root: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// Errors that abort a whole tree comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

pub type CompareResult<T> = Result<T, CompareError>;
