use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::response::ResponseValue;
use super::risk::Platform;

/// One answered sub-question within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerEntry {
    pub number: String,
    pub response: ResponseValue,
}

/// All answers given for one question group, in the order they were asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupResponse {
    pub id: u32,
    pub questions: Vec<AnswerEntry>,
}

/// A complete questionnaire submission for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Submission {
    pub patient_id: Uuid,
    pub platform: Platform,
    pub response: Vec<GroupResponse>,
}
