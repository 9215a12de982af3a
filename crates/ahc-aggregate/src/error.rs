//! Error taxonomy for score aggregation.

use std::path::PathBuf;

/// Errors that abort an aggregation run.
///
/// Per-file scoring failures are never represented here; they are recorded
/// as rejected entries in the report instead.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("no target directories given; pass at least one directory name under out/")]
    NoTargets,

    #[error("invalid target directory name: {0:?}")]
    InvalidTarget(String),

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AggregateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;
