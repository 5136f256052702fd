use std::collections::HashMap;

use crate::catalog::QuestionCatalog;
use crate::key::QuestionKey;

/// What the dialog needs to know about an outbound question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedQuestion {
    pub key: QuestionKey,
    pub question: String,
    pub options: Vec<String>,
}

/// Immutable lookup from [`QuestionKey`] to question text and options,
/// built once per catalog.
#[derive(Debug, Clone, Default)]
pub struct QuestionIndex {
    entries: HashMap<QuestionKey, IndexedQuestion>,
}

impl QuestionIndex {
    pub fn build(catalog: &QuestionCatalog) -> Self {
        let mut entries = HashMap::new();
        for group in &catalog.groups {
            for question in &group.questions {
                let mut letters = question.number.chars();
                let (Some(letter), None) = (letters.next(), letters.next()) else {
                    tracing::warn!(
                        group_id = group.id,
                        number = %question.number,
                        "sub-question number is not a single letter, not indexed"
                    );
                    continue;
                };
                let key = QuestionKey::new(group.id, letter.to_ascii_lowercase());
                entries.insert(
                    key,
                    IndexedQuestion {
                        key,
                        question: question.question.clone(),
                        options: question.options.clone(),
                    },
                );
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &QuestionKey) -> Option<&IndexedQuestion> {
        self.entries.get(key)
    }

    /// Resolve the question a prompt text refers to.
    pub fn resolve(&self, text: &str) -> Option<&IndexedQuestion> {
        QuestionKey::find_in(text).and_then(|key| self.get(&key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
