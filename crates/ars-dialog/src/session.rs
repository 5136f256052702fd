use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ars_risk::key::QuestionKey;

/// Where a conversation stands between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    New,
    Verifying,
    Active,
    AwaitingContinue,
    Ended,
}

/// Per-participant dialog state, stored as JSON under `session-{key}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub participant_id: Option<Uuid>,
    pub verifying: bool,
    pub end_of_session: bool,
    pub session_id: Option<String>,
    pub last_session_id: Option<String>,
    pub last_input: Option<String>,
    pub last_output: Option<String>,
    #[serde(rename = "lastQID")]
    pub last_qid: Option<QuestionKey>,
    /// Last save.
    pub date: Option<Timestamp>,
}

impl Session {
    pub fn state(&self, awaiting_continue: bool) -> DialogState {
        if self.end_of_session {
            DialogState::Ended
        } else if awaiting_continue {
            DialogState::AwaitingContinue
        } else if self.participant_id.is_some() {
            DialogState::Active
        } else if self.verifying {
            DialogState::Verifying
        } else {
            DialogState::New
        }
    }

    pub fn touched_on(&self, day: Date, tz: &TimeZone) -> bool {
        self.date
            .is_some_and(|at| at.to_zoned(tz.clone()).date() == day)
    }

    /// An interrupted dialog from earlier today can be picked up again.
    pub fn is_resumable(&self, today: Date, tz: &TimeZone) -> bool {
        !self.end_of_session && self.session_id.is_some() && self.touched_on(today, tz)
    }

    pub fn stamp(&mut self) {
        self.date = Some(Timestamp::now());
    }
}
