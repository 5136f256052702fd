//! Answers collected across the turns of one dialog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ars_core::models::response::{leading_integer, ResponseValue};
use ars_core::models::submission::{AnswerEntry, GroupResponse};
use ars_risk::index::IndexedQuestion;
use ars_risk::key::QuestionKey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSlot {
    pub question: String,
    pub options: Vec<String>,
    pub session_id: Option<String>,
    pub response: Option<String>,
}

/// Question slots keyed by [`QuestionKey`], filled in as answers arrive.
/// Every operation consumes the accumulator and returns the updated one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerAccumulator {
    slots: BTreeMap<QuestionKey, AnswerSlot>,
}

impl AnswerAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a slot for a question the flow just asked. Asking the same
    /// question again clears its previous answer.
    pub fn record_question(mut self, question: &IndexedQuestion, session_id: Option<String>) -> Self {
        self.slots.insert(
            question.key,
            AnswerSlot {
                question: question.question.clone(),
                options: question.options.clone(),
                session_id,
                response: None,
            },
        );
        self
    }

    /// Fill the slot for `key`. A numeric input picks the 1-based option
    /// when the question has options; anything else is stored as typed.
    /// Answers to questions that were never asked are dropped.
    pub fn record_answer(mut self, key: &QuestionKey, input: &str) -> Self {
        match self.slots.get_mut(key) {
            Some(slot) => slot.response = Some(select_option(&slot.options, input)),
            None => tracing::debug!(question = %key, "answer for a question that was not asked"),
        }
        self
    }

    pub fn get(&self, key: &QuestionKey) -> Option<&AnswerSlot> {
        self.slots.get(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when at least one slot holds an answer.
    pub fn has_answers(&self) -> bool {
        self.slots.values().any(|slot| slot.response.is_some())
    }

    /// Answered slots as a submission body, grouped by question group in
    /// ascending group and letter order.
    pub fn into_groups(self) -> Vec<GroupResponse> {
        let mut groups: Vec<GroupResponse> = Vec::new();
        for (key, slot) in self.slots {
            let Some(response) = slot.response else {
                continue;
            };
            let entry = AnswerEntry {
                number: key.number(),
                response: ResponseValue::Text(response),
            };
            match groups.last_mut() {
                Some(group) if group.id == key.group_id => group.questions.push(entry),
                _ => groups.push(GroupResponse {
                    id: key.group_id,
                    questions: vec![entry],
                }),
            }
        }
        groups
    }
}

fn select_option(options: &[String], input: &str) -> String {
    if options.is_empty() {
        return input.to_string();
    }
    leading_integer(input)
        .and_then(|n| usize::try_from(n).ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}
