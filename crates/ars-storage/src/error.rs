use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("not found: {key}")]
    NotFound { key: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}
