//! Error taxonomy for the board.

use std::path::PathBuf;

use thiserror::Error;

use super::TaskId;

/// Everything a store operation can fail with.
///
/// The front-end maps these onto its own status codes: validation failures
/// are 400-class, a missing id is 404-class, storage failures are 500-class.
/// Storage failures are the only class worth logging rather than simply
/// reporting back to the caller.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A provided field is missing, empty or outside the configured
    /// vocabulary. Raised before any mutation is applied.
    #[error("{0}")]
    Validation(String),

    /// No task carries the referenced id.
    #[error("task with id {0} not found")]
    NotFound(TaskId),

    /// The task file exists but does not parse. Never silently treated as
    /// an empty board: losing data quietly is worse than failing loudly.
    #[error("task file {} is corrupt: {}", .path.display(), .source)]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The task file exists but could not be read.
    #[error("failed to read task file {}: {}", .path.display(), .source)]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisting failed (disk full, permissions, ...). Not retried at this
    /// layer; the caller decides on retry/abort.
    #[error("failed to write task file {}: {}", .path.display(), .source)]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BoardError {
    /// True for I/O and parse failures, the class a server logs.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageCorrupt { .. } | Self::StorageRead { .. } | Self::StorageWrite { .. }
        )
    }
}
