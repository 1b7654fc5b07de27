use thiserror::Error;

/// Errors raised by a [`super::SessionStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Errors that can occur while persisting the session.
///
/// These never escape the session store; they are logged and the in-memory
/// session stays authoritative.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
