use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
}

/// One logged leg of a telephony exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogMessage {
    pub id: Uuid,
    pub direction: Direction,
    /// E.164 phone number of the participant.
    pub phone: String,
    pub session_id: Option<String>,
    pub service_code: Option<String>,
    pub text: String,
    pub end_of_session: bool,
    pub gateway_message_id: Option<String>,
    pub gateway_channel_id: Option<String>,
    pub created_at: jiff::Timestamp,
}
