//! Unified error types for feedline.
//!
//! Every variant's display string starts with a stable upper-case code so
//! callers and logs can classify failures without matching on messages.

use tokio_rusqlite::rusqlite;

/// Unified error type shared by the loaders, stores and composites.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The network transport failed before a response was received.
    #[error("CONNECTIVITY: {0}")]
    Connectivity(String),

    /// A response arrived but could not be mapped (bad status, bad JSON, empty body).
    #[error("INVALID_DATA: {0}")]
    InvalidData(String),

    /// The store could not remove the cached feed.
    #[error("CACHE_DELETION: {0}")]
    Deletion(String),

    /// The store could not write a new snapshot.
    #[error("CACHE_INSERTION: {0}")]
    Insertion(String),

    /// The store is unreadable or holds undecodable data.
    #[error("CACHE_RETRIEVAL: {0}")]
    Retrieval(String),

    /// No image data is cached for the requested URL.
    #[error("IMAGE_DATA_NOT_FOUND: {0}")]
    ImageDataNotFound(String),

    /// The load was cancelled before it produced a result.
    #[error("CANCELLED")]
    Cancelled,

    /// A spawned load panicked.
    #[error("TASK_FAILED: {0}")]
    TaskFailed(String),

    /// The cache location could not be prepared.
    #[error("CACHE_OPEN: {0}")]
    Open(String),

    /// Database operation failed outside a feed store operation (open, pragmas).
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl Error {
    /// True when the stored snapshot itself is unreadable, which purging the
    /// cache repairs.
    pub fn is_purgeable(&self) -> bool {
        matches!(self, Error::Retrieval(_))
    }
}
