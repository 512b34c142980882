use std::path::PathBuf;

use aminovec_canonical::EncodeError;
use thiserror::Error;

/// Errors that abort fixture generation.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// A catalog value could not be encoded.
    #[error("{catalog}[{index}] {value}: {source}")]
    Encode {
        /// Catalog holding the value.
        catalog: &'static str,
        /// Position of the value in its catalog.
        index: usize,
        /// Compact JSON rendering of the value.
        value: String,
        /// Underlying encoder error.
        #[source]
        source: EncodeError,
    },
    /// Rendering a fixture to JSON failed.
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing a fixture file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A fixture file exists and overwriting was not requested.
    #[error("{0} already exists; use --force to overwrite")]
    AlreadyExists(PathBuf),
}

impl FixtureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixtureError::Io {
            path: path.into(),
            source,
        }
    }
}
