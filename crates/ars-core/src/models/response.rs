use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A participant's answer to one sub-question, as submitted or as
/// normalized by the risk engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ResponseValue {
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl ResponseValue {
    /// Items of a multi-select answer. A single text answer counts as one
    /// selection; numbers select nothing.
    pub fn selections(&self) -> Vec<&str> {
        match self {
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::Text(text) => vec![text.as_str()],
            Self::Number(_) => Vec::new(),
        }
    }

    /// Text form of a scalar answer, `None` for lists.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Number(n) => Some(n.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for ResponseValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Parse the leading integer of a string: optional sign followed by digits,
/// ignoring anything after. `"12 weeks"` is 12, `"abc"` is `None`.
pub fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}
