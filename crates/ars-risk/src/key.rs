//! Question keys as they appear in outbound prompts (`Q17a Do you have…`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static PROMPT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q(\d{1,2})([a-c])\s").expect("prompt prefix pattern is valid"));

static KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Qq](\d{1,2})([a-c])$").expect("key pattern is valid"));

/// Identifies one sub-question: the group id plus the sub-question letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct QuestionKey {
    pub group_id: u32,
    pub letter: char,
}

impl QuestionKey {
    pub fn new(group_id: u32, letter: char) -> Self {
        Self { group_id, letter }
    }

    /// Find the first `Q<id><letter> ` prefix in a prompt.
    pub fn find_in(text: &str) -> Option<Self> {
        let captures = PROMPT_PREFIX.captures(text)?;
        let group_id = captures.get(1)?.as_str().parse().ok()?;
        let letter = captures.get(2)?.as_str().chars().next()?;
        Some(Self { group_id, letter })
    }

    /// Remove the first `Q<id><letter> ` prefix from a prompt.
    pub fn strip_from(text: &str) -> String {
        PROMPT_PREFIX.replace(text, "").into_owned()
    }

    /// The sub-question number as stored in the catalog.
    pub fn number(&self) -> String {
        self.letter.to_string()
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}{}", self.group_id, self.letter)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("not a question key: {0}")]
pub struct InvalidQuestionKey(String);

impl FromStr for QuestionKey {
    type Err = InvalidQuestionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidQuestionKey(s.to_string());
        let captures = KEY.captures(s.trim()).ok_or_else(invalid)?;
        let group_id = captures[1].parse().map_err(|_| invalid())?;
        let letter = captures[2].chars().next().ok_or_else(invalid)?;
        Ok(Self { group_id, letter })
    }
}

impl From<QuestionKey> for String {
    fn from(key: QuestionKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for QuestionKey {
    type Error = InvalidQuestionKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
