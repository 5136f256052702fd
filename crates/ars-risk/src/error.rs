use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("submission contains no question groups")]
    EmptySubmission,

    #[error("question group {group_id} contains no answers")]
    EmptyGroup { group_id: u32 },

    #[error("invalid response for question {group_id}{number}: {reason}")]
    InvalidResponse {
        group_id: u32,
        number: String,
        reason: String,
    },

    #[error("unknown question group {group_id} in the {catalog} catalog")]
    UnknownGroup { group_id: u32, catalog: &'static str },

    #[error("question group {group_id} has no sub-question '{number}'")]
    UnknownQuestion { group_id: u32, number: String },
}

impl RiskError {
    /// True when the submission itself is malformed, as opposed to
    /// referencing questions the catalog does not contain.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptySubmission | Self::EmptyGroup { .. } | Self::InvalidResponse { .. }
        )
    }
}
