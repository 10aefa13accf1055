//! Error types for dbpack-pack

use dbpack_core::CoreError;
use dbpack_db::DbError;
use thiserror::Error;

/// Packaging errors
///
/// A build or export returns these only for run-level failures (missing
/// target, unopenable artifact, broken schema). Per-item failures are
/// recorded in the report instead.
#[derive(Error, Debug)]
pub enum PackError {
    /// Project or control-file error, carrying its own code
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage error, carrying its own code
    #[error(transparent)]
    Db(#[from] DbError),

    /// Target directory does not exist (P002)
    #[error("[P002] Target directory not found: {path}")]
    TargetNotFound { path: String },

    /// Schema definition failed to execute; fatal for the run (P003)
    #[error("[P003] Schema '{path}' failed: {source}")]
    Schema { path: String, source: DbError },

    /// CSV could not be read or written (P004)
    #[error("[P004] CSV error in '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    /// File could not be read or written (P005)
    #[error("[P005] IO error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization failed (P006)
    #[error("[P006] JSON error in '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    /// Database file to export does not exist (P007)
    #[error("[P007] Database file not found: {path}")]
    DatabaseNotFound { path: String },
}

/// Result type alias for PackError
pub type PackResult<T> = Result<T, PackError>;

impl PackError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        PackError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        PackError::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}
