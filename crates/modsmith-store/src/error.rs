//! Error types for the artifact store

use std::path::PathBuf;

/// Artifact store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No artifact exists for the feature name
    #[error("artifact not found: {0}")]
    NotFound(String),

    /// Feature name sanitizes to nothing usable
    #[error("invalid feature name: {0:?}")]
    InvalidName(String),

    /// Filesystem failure
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wrap an io error with the path it occurred at
    #[inline]
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
