//! Error types for partition persistence

use std::path::PathBuf;

/// Errors raised by a [`PartitionStore`](crate::PartitionStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Key cannot be used as a partition name
    #[error("invalid partition key: '{0}'")]
    InvalidKey(String),

    /// IO error on the backing file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be encoded
    #[error("failed to encode partition '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
