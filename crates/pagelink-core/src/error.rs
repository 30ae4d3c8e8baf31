use thiserror::Error;

/// Result type for collaborator (store, index) operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures reported by the host collaborators.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Validation failures for values parsed from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid page id: {0}")]
    InvalidPageId(String),
    #[error("invalid document reference: {0}")]
    InvalidDocumentRef(String),
    #[error("invalid short link: {0}")]
    InvalidShortLink(String),
}

/// Errors surfaced by the short-link operations.
///
/// `NotFound` and `LookupFailed` are deliberately distinct: a failed query
/// never reads as "nothing there".
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("lookup failed: {0}")]
    LookupFailed(#[source] StorageError),
    #[error("page id generation failed: {0}")]
    GenerationFailed(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<StorageError> for LinkError {
    fn from(value: StorageError) -> Self {
        LinkError::LookupFailed(value)
    }
}

impl From<CoreError> for LinkError {
    fn from(value: CoreError) -> Self {
        LinkError::InvalidRequest(value.to_string())
    }
}
