//! Key/value store key conventions.
//!
//! Every per-conversation key is derived from the same conversation key
//! (see [`crate::phone::conversation_key`]), so the session record, the
//! answer accumulator, the awaiting-continue flag and the correlator
//! subscription always agree byte for byte.

pub fn session(conversation_key: &str) -> String {
    format!("session-{conversation_key}")
}

pub fn participant(conversation_key: &str) -> String {
    format!("participant-{conversation_key}")
}

pub fn answers(conversation_key: &str) -> String {
    format!("participant-messages-{conversation_key}")
}

pub fn awaiting_continue(conversation_key: &str) -> String {
    format!("continue-{conversation_key}")
}

/// Snapshot of the runtime gateway settings.
pub const CONFIG: &str = "config";

/// The full set of keys owned by one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationKeys {
    pub conversation: String,
    pub session: String,
    pub participant: String,
    pub answers: String,
    pub awaiting_continue: String,
}

impl ConversationKeys {
    pub fn new(conversation_key: &str) -> Self {
        Self {
            conversation: conversation_key.to_string(),
            session: session(conversation_key),
            participant: participant(conversation_key),
            answers: answers(conversation_key),
            awaiting_continue: awaiting_continue(conversation_key),
        }
    }
}
