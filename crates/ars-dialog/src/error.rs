use thiserror::Error;

use ars_core::error::CoreError;
use ars_risk::error::RiskError;
use ars_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum DialogError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("gateway request failed: {0}")]
    UpstreamGateway(String),

    #[error("no delivery for {key} within {seconds}s")]
    DeliveryTimeout { key: String, seconds: u64 },

    #[error("waiter for {key} was replaced by a newer turn")]
    Superseded { key: String },

    #[error("waiter for {key} was cancelled")]
    Cancelled { key: String },

    #[error("no verified participant for {key}")]
    MissingParticipant { key: String },

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("setting {0} cannot be changed at runtime")]
    ReadOnlySetting(String),
}
