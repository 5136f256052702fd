//! Fixed texts and the small text rules of the USSD protocol.

use ars_core::models::response::leading_integer;
use ars_risk::key::QuestionKey;

/// Payload that starts the questionnaire flow.
pub const FLOW_TRIGGER: &str = "ussd";
/// First word of a flow message that closes the session.
pub const END_OF_SESSION: &str = "END";
pub const CONTINUE: &str = "CON";

pub const CONTINUE_YES: &str = "1";
pub const CONTINUE_NO: &str = "2";
/// Value stored under the awaiting-continue key.
pub const CONTINUE_FLAG_ON: &str = "on";

/// Inputs that navigate the flow rather than answer a question.
pub const IGNORED_INPUT: [&str; 4] = ["0", "#", "##", "99"];

/// Delivered texts containing these phrases are never indexed as questions.
const NON_QUESTION_PHRASES: [&str; 2] = ["thank you", "to proceed"];

pub const PHONE_NOT_FOUND: &str = "Your phone number was not found in the registered participant, kindly provide a code to proceed";
pub const CODE_NOT_FOUND: &str = "END The code you provided is not in our record, kindly request an administrator to register you";
pub const DELIVERY_ACK: &str = "message received successfully";

pub fn continue_prompt() -> String {
    reply(
        &format!(
            "You did not conclude your last session, please select \n {CONTINUE_YES}. Continue \n {CONTINUE_NO}. Start Again "
        ),
        false,
    )
}

pub fn closing_message(recommendation: &str) -> String {
    format!("{END_OF_SESSION} Thank you for taking the assessment. {recommendation}")
}

pub fn reply(text: &str, end: bool) -> String {
    let prefix = if end { END_OF_SESSION } else { CONTINUE };
    format!("{prefix} {text}")
}

pub fn is_end_of_session(text: &str) -> bool {
    text.split(' ')
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case(END_OF_SESSION))
}

/// Turn a flow message into the text shown on the handset: drop the end
/// sentinel and the question key, then prefix `CON`/`END`.
pub fn clean(text: &str) -> String {
    let end = is_end_of_session(text);
    let body = if end { &text[END_OF_SESSION.len()..] } else { text };
    let body = QuestionKey::strip_from(body);
    reply(body.trim_start(), end)
}

pub fn ignore_text(text: &str) -> bool {
    let lower = text.to_lowercase();
    NON_QUESTION_PHRASES.iter().any(|p| lower.contains(p))
}

pub fn is_ignored_input(input: &str) -> bool {
    IGNORED_INPUT.contains(&input)
}

/// The participant's latest input: USSD gateways send the whole
/// `*`-separated navigation history.
pub fn last_segment(text: &str) -> &str {
    text.rsplit('*').next().unwrap_or_default()
}

/// Text forwarded to the flow: the trigger for an empty input, the leading
/// integer for numeric input, otherwise the input as typed.
pub fn payload_text(input: &str) -> String {
    if input.is_empty() {
        return FLOW_TRIGGER.to_string();
    }
    match leading_integer(input) {
        Some(n) => n.to_string(),
        None => input.to_string(),
    }
}

/// Align the gateway's session id with the dialog's. A trigger starts a new
/// dialog and remembers the incoming id; any other turn keeps the id the
/// dialog started with.
pub fn reconcile_session_ids(
    session_id: Option<String>,
    payload: &str,
    last_session_id: Option<String>,
) -> (Option<String>, Option<String>) {
    let is_trigger = payload == FLOW_TRIGGER;
    let (mut session_id, last_session_id) = if is_trigger {
        (session_id.clone(), session_id)
    } else if session_id.is_some() && session_id != last_session_id {
        (last_session_id.clone(), last_session_id)
    } else {
        (session_id, last_session_id)
    };
    if session_id.is_none() && is_trigger {
        session_id = Some(uuid::Uuid::new_v4().to_string());
    }
    (session_id, last_session_id)
}
