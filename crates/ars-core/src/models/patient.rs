use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A registered study participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    /// Seven-digit registration code used to verify from an unknown phone.
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub state: String,
    pub lga: String,
    /// E.164 phone number.
    pub phone_number: String,
    pub created_at: jiff::Timestamp,
}
