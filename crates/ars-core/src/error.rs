use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("invalid risk level: {0}")]
    InvalidRiskLevel(String),

    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("invalid uuid: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
