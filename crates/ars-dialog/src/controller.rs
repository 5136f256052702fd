//! The per-turn state machine.
//!
//! A turn runs: verify the participant, offer to resume an interrupted
//! dialog, forward the input to the flow, record the answer, then wait for
//! the flow's reply on the correlator. The reply is stored on the session
//! and, when it closes the dialog, the collected answers are scored.

use std::sync::Arc;
use std::time::Duration;

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use ars_core::cache_keys::ConversationKeys;
use ars_core::models::message::{DialogMessage, Direction};
use ars_core::models::patient::Patient;
use ars_core::models::risk::Platform;
use ars_core::phone;
use ars_risk::key::QuestionKey;
use ars_storage::kv::KeyValueStore;
use ars_storage::messages::MessageLog;
use ars_storage::patients::PatientDirectory;
use ars_storage::records::RiskRecordStore;
use ars_storage::state::{load_state, load_state_or_default, save_state};

use crate::accumulator::AnswerAccumulator;
use crate::correlator::MessageCorrelator;
use crate::error::DialogError;
use crate::gateway::{Gateway, OutboundMessage};
use crate::messages;
use crate::session::Session;
use crate::settings::SharedSettings;

pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// An inbound USSD turn as posted by the telco aggregator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    #[serde(default)]
    pub service_code: Option<String>,
    pub phone_number: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// A flow message delivered by RapidPro for a participant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryRequest {
    pub to: String,
    pub text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
}

/// What the correlator hands from the delivery callback to the waiting turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub text: String,
    pub gateway_message_id: Option<String>,
}

/// Collaborators of the controller, owned by the composition root.
#[derive(Clone)]
pub struct DialogDeps {
    pub store: Arc<dyn KeyValueStore>,
    pub patients: Arc<dyn PatientDirectory>,
    pub records: Arc<dyn RiskRecordStore>,
    pub messages: Arc<dyn MessageLog>,
    pub gateway: Arc<dyn Gateway>,
    pub correlator: Arc<MessageCorrelator<Delivery>>,
    pub settings: SharedSettings,
}

pub struct DialogController {
    deps: DialogDeps,
    delivery_timeout: Duration,
}

enum Verification {
    Verified(Session),
    Rejected(String),
}

impl DialogController {
    pub fn new(deps: DialogDeps) -> Self {
        Self {
            deps,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    /// Handle one inbound turn and return the `CON …`/`END …` reply.
    pub async fn handle_turn(&self, request: TurnRequest) -> Result<String, DialogError> {
        let input = messages::last_segment(request.text.as_deref().unwrap_or_default()).to_string();
        let last_input = input.clone();
        let phone = phone::normalize(&request.phone_number)?;
        let keys = ConversationKeys::new(&phone::conversation_key(&phone));
        let store = self.deps.store.as_ref();

        let mut session: Session = load_state_or_default(store, &keys.session).await?;
        let last_qid = session.last_qid;
        let mut last_session_id = session.last_session_id.clone();
        let mut session_id = request.session_id.clone();
        let mut text = input;

        let settings = self.deps.settings.snapshot();
        let tz = settings.zone();
        let today = Timestamp::now().to_zoned(tz.clone()).date();
        let resumable = session.is_resumable(today, &tz);

        if session.participant_id.is_none() || text.is_empty() {
            match self.verify(&phone, &text, session, &keys).await? {
                Verification::Verified(verified) => {
                    session = verified;
                    text.clear();
                }
                Verification::Rejected(message) => return Ok(messages::clean(&message)),
            }
        }

        if text.is_empty() && resumable {
            save_state(store, &keys.awaiting_continue, &messages::CONTINUE_FLAG_ON).await?;
            tracing::info!(key = %keys.conversation, "offering to resume interrupted dialog");
            return Ok(messages::continue_prompt());
        }

        let awaiting: Option<String> = load_state(store, &keys.awaiting_continue).await?;
        if awaiting.as_deref() == Some(messages::CONTINUE_FLAG_ON) {
            store.delete(&keys.awaiting_continue).await?;
            if text == messages::CONTINUE_NO {
                text = messages::FLOW_TRIGGER.to_string();
            } else {
                session_id = session.last_session_id.clone();
                if let Some(output) = &session.last_output {
                    return Ok(messages::clean(output));
                }
            }
        }

        let payload = messages::payload_text(&text);
        let is_trigger = payload == messages::FLOW_TRIGGER;
        (session_id, last_session_id) =
            messages::reconcile_session_ids(session_id, &payload, last_session_id);

        tracing::debug!(
            key = %keys.conversation,
            state = ?session.state(false),
            trigger = is_trigger,
            "dispatching turn"
        );

        // The delivery callback writes the same accumulator; answers are
        // settled before the gateway call and rolled back if it fails.
        let settled_answers = store.get(&keys.answers).await?;
        if is_trigger {
            store.delete(&keys.answers).await?;
        } else if !messages::is_ignored_input(&text) {
            if let Some(qid) = last_qid {
                let answers: AnswerAccumulator = load_state_or_default(store, &keys.answers).await?;
                save_state(store, &keys.answers, &answers.record_answer(&qid, &text)).await?;
            }
        }

        let subscription = self.deps.correlator.subscribe_once(&keys.conversation);
        let outbound = OutboundMessage {
            from: phone.clone(),
            to: request.service_code.clone().unwrap_or_default(),
            text: payload.clone(),
            date: Timestamp::now(),
        };
        if let Err(e) = self.deps.gateway.send(outbound).await {
            self.deps.correlator.cancel(&keys.conversation);
            match settled_answers {
                Some(raw) => store.set(&keys.answers, raw).await?,
                None => store.delete(&keys.answers).await?,
            }
            return Err(e);
        }

        self.deps
            .messages
            .append(DialogMessage {
                id: Uuid::new_v4(),
                direction: Direction::In,
                phone: phone.clone(),
                session_id: session_id.clone(),
                service_code: request.service_code.clone(),
                text: payload.clone(),
                end_of_session: false,
                gateway_message_id: None,
                gateway_channel_id: None,
                created_at: Timestamp::now(),
            })
            .await?;

        session.session_id = session_id.clone();
        session.last_input = Some(last_input.clone());
        session.last_session_id = last_session_id.clone();
        self.save_session(&keys, &mut session).await?;

        let delivery = match tokio::time::timeout(self.delivery_timeout, subscription.recv()).await {
            Ok(delivery) => delivery?,
            Err(_) => {
                self.deps.correlator.cancel(&keys.conversation);
                tracing::warn!(key = %keys.conversation, "timed out waiting for flow delivery");
                return Err(DialogError::DeliveryTimeout {
                    key: keys.conversation.clone(),
                    seconds: self.delivery_timeout.as_secs(),
                });
            }
        };

        let end = messages::is_end_of_session(&delivery.text);
        let qid = if messages::is_ignored_input(&last_input) {
            last_qid
        } else {
            QuestionKey::find_in(&delivery.text)
        };
        session.end_of_session = end;
        session.last_output = Some(delivery.text.clone());
        session.last_qid = if end { None } else { qid };
        session.last_session_id = if end { session_id.clone() } else { last_session_id };
        session.session_id = if end { None } else { session_id };
        self.save_session(&keys, &mut session).await?;

        if end {
            return self.finish(&keys, &session, &delivery, today).await;
        }
        Ok(messages::clean(&delivery.text))
    }

    /// Handle a flow message delivered for a participant.
    pub async fn handle_delivery(&self, request: DeliveryRequest) -> Result<&'static str, DialogError> {
        let phone = phone::normalize(&request.to)?;
        let keys = ConversationKeys::new(&phone::conversation_key(&phone));
        let store = self.deps.store.as_ref();
        let session: Session = load_state_or_default(store, &keys.session).await?;
        let end = messages::is_end_of_session(&request.text);

        if !messages::ignore_text(&request.text) {
            if let Some(question) = ars_risk::index(Platform::Ussd).resolve(&request.text) {
                let answers: AnswerAccumulator = load_state_or_default(store, &keys.answers).await?;
                let answers = answers.record_question(question, session.session_id.clone());
                save_state(store, &keys.answers, &answers).await?;
            }
        }

        self.deps
            .messages
            .append(DialogMessage {
                id: Uuid::new_v4(),
                direction: Direction::Out,
                phone: phone.clone(),
                session_id: session.session_id.clone(),
                service_code: None,
                text: request.text.clone(),
                end_of_session: end,
                gateway_message_id: request.id.clone(),
                gateway_channel_id: request.channel.clone(),
                created_at: Timestamp::now(),
            })
            .await?;

        let delivered = self.deps.correlator.publish(
            &keys.conversation,
            Delivery {
                text: request.text,
                gateway_message_id: request.id,
            },
        );
        if !delivered {
            tracing::warn!(key = %keys.conversation, "delivery arrived with no turn waiting");
        }
        Ok(messages::DELIVERY_ACK)
    }

    async fn verify(
        &self,
        phone: &str,
        text: &str,
        session: Session,
        keys: &ConversationKeys,
    ) -> Result<Verification, DialogError> {
        if session.participant_id.is_some() {
            return Ok(Verification::Verified(session));
        }

        let mut session = Session {
            verifying: true,
            ..session
        };
        let (participant, rejection) = if text.is_empty() {
            (self.deps.patients.by_phone(phone).await?, messages::PHONE_NOT_FOUND)
        } else {
            let code = text.to_uppercase();
            (self.deps.patients.by_code(&code).await?, messages::CODE_NOT_FOUND)
        };
        save_state(self.deps.store.as_ref(), &keys.participant, &participant).await?;

        let verified = participant.as_ref().map(|p| p.id);
        if let Some(id) = verified {
            session.participant_id = Some(id);
            session.verifying = false;
            tracing::info!(key = %keys.conversation, participant_id = %id, "participant verified");
        }
        self.save_session(keys, &mut session).await?;

        Ok(match verified {
            Some(_) => Verification::Verified(session),
            None => Verification::Rejected(rejection.to_string()),
        })
    }

    /// Score the finished dialog and tear its state down.
    async fn finish(
        &self,
        keys: &ConversationKeys,
        session: &Session,
        delivery: &Delivery,
        today: Date,
    ) -> Result<String, DialogError> {
        let store = self.deps.store.as_ref();
        let answers: AnswerAccumulator = load_state_or_default(store, &keys.answers).await?;
        let participant = load_state::<Option<Patient>, _>(store, &keys.participant)
            .await?
            .flatten();

        let reply = if answers.has_answers() {
            let patient_id = participant
                .map(|p| p.id)
                .or(session.participant_id)
                .ok_or_else(|| DialogError::MissingParticipant {
                    key: keys.conversation.clone(),
                })?;
            let scored = ars_risk::stratify::stratify(
                ars_risk::catalog(Platform::Ussd),
                &answers.into_groups(),
                today,
            )?;
            let record = self
                .deps
                .records
                .insert(scored.into_record(patient_id, Platform::Ussd))
                .await?;
            tracing::info!(
                record_id = %record.id,
                patient_id = %patient_id,
                risk_level = %record.risk_level,
                risk_value = record.risk_value,
                "dialog scored"
            );
            messages::closing_message(&record.recommendation)
        } else {
            tracing::info!(key = %keys.conversation, "dialog ended without answers, nothing to score");
            delivery.text.clone()
        };

        for key in [&keys.participant, &keys.session, &keys.answers] {
            store.delete(key).await?;
        }
        Ok(messages::clean(&reply))
    }

    async fn save_session(
        &self,
        keys: &ConversationKeys,
        session: &mut Session,
    ) -> Result<(), DialogError> {
        session.stamp();
        save_state(self.deps.store.as_ref(), &keys.session, &*session).await?;
        Ok(())
    }
}

/// Accept a string or a number; gateways are inconsistent about ids.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Lenient>::deserialize(deserializer)?.map(|value| match value {
        Lenient::Text(text) => text,
        Lenient::Number(number) => number.to_string(),
    }))
}
