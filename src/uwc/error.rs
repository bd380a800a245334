//! Error type shared by every stage of the unique-word pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::io_error_msg;

/// Result alias used throughout the `uwc` module.
pub type Result<T, E = UwcError> = std::result::Result<T, E>;

/// Failures that abort a `process_file` call. There is no partial result:
/// any variant means the vocabulary was not updated.
#[derive(Debug, Error)]
pub enum UwcError {
    /// Rejected before any processing began (bad worker count, etc.).
    #[error("{0}")]
    Config(String),
    /// The source file could not be opened or mapped.
    #[error("{}: {}", .path.display(), io_error_msg(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A chunk read or boundary extension failed mid-stream.
    #[error("read error in chunk starting at byte {}: {}", .offset, io_error_msg(.source))]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },
    /// A worker thread panicked before returning its word set.
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
    /// An invariant of the read protocol was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl UwcError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }
}
