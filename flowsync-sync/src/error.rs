//! Error types for flowsync-sync.
//!
//! Failures the run knows how to absorb (rejected calls, missing scripts) are
//! logged to the journal and never become a [`SyncError`].

use std::path::PathBuf;

use thiserror::Error;

use flowsync_client::ClientError;

#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote call failed outside the API contract.
    #[error("remote call failed: {0}")]
    Client(#[from] ClientError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Audit rendering of a request payload failed.
    #[error("payload JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
