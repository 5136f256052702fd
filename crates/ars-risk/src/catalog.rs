use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use ars_core::models::response::ResponseValue;
use ars_core::models::risk::{Platform, RiskLevel};

/// How an answer is normalized before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum InputType {
    /// A calendar date, converted to whole years or months elapsed.
    Date,
    /// An integer count.
    Number,
    /// One or more selections from the option list.
    Multi,
    /// A single choice, compared as-is.
    Other,
}

/// How the client renders the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseType {
    Radio,
    Checkbox,
    Date,
    Number,
}

/// Unit of elapsed time for date questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateUnit {
    #[default]
    Years,
    Months,
}

/// One value list per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSet<T> {
    pub high: Vec<T>,
    pub medium: Vec<T>,
    pub low: Vec<T>,
}

impl<T> Default for TierSet<T> {
    fn default() -> Self {
        Self {
            high: Vec::new(),
            medium: Vec::new(),
            low: Vec::new(),
        }
    }
}

/// One inclusive bound pair per tier. `None` never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierRanges {
    pub high: Option<RangeInclusive<i64>>,
    pub medium: Option<RangeInclusive<i64>>,
    pub low: Option<RangeInclusive<i64>>,
}

/// The classification strategy of a sub-question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskRule {
    /// The normalized answer must equal one of the tier's values.
    Direct(TierSet<ResponseValue>),
    /// The numeric answer must fall inside the tier's bounds.
    Range(TierRanges),
    /// Any selection found in the tier's list sets the tier.
    AnyOf(TierSet<String>),
    /// Combinations of selections decide the tier; see
    /// [`crate::classify`] for the matching order.
    Paired {
        tiers: TierSet<String>,
        pairs: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone)]
pub struct SubQuestion {
    /// Letter within the group (`a`, `b`, `c`).
    pub number: String,
    pub question: String,
    pub options: Vec<String>,
    pub response_type: ResponseType,
    pub input_type: InputType,
    pub date_unit: DateUnit,
    pub active: bool,
    pub can_break_execution: bool,
    pub break_when_risk_is: Vec<RiskLevel>,
    pub rule: RiskRule,
}

impl SubQuestion {
    fn new(
        number: &str,
        question: &str,
        options: &[&str],
        response_type: ResponseType,
        input_type: InputType,
        rule: RiskRule,
    ) -> Self {
        Self {
            number: number.to_string(),
            question: question.to_string(),
            options: strings(options),
            response_type,
            input_type,
            date_unit: DateUnit::Years,
            active: true,
            can_break_execution: false,
            break_when_risk_is: Vec::new(),
            rule,
        }
    }

    /// Single choice, matched directly against the tier lists.
    pub fn choice(
        number: &str,
        question: &str,
        options: &[&str],
        high: &[&str],
        medium: &[&str],
        low: &[&str],
    ) -> Self {
        let values = |items: &[&str]| -> Vec<ResponseValue> {
            items.iter().map(|s| ResponseValue::from(*s)).collect()
        };
        Self::new(
            number,
            question,
            options,
            ResponseType::Radio,
            InputType::Other,
            RiskRule::Direct(TierSet {
                high: values(high),
                medium: values(medium),
                low: values(low),
            }),
        )
    }

    /// Date converted to elapsed `unit`s, matched directly against the tier lists.
    pub fn date(
        number: &str,
        question: &str,
        unit: DateUnit,
        high: impl IntoIterator<Item = i64>,
        medium: impl IntoIterator<Item = i64>,
        low: impl IntoIterator<Item = i64>,
    ) -> Self {
        let values = |items: Vec<i64>| -> Vec<ResponseValue> {
            items.into_iter().map(ResponseValue::Number).collect()
        };
        let mut question = Self::new(
            number,
            question,
            &[],
            ResponseType::Date,
            InputType::Date,
            RiskRule::Direct(TierSet {
                high: values(high.into_iter().collect()),
                medium: values(medium.into_iter().collect()),
                low: values(low.into_iter().collect()),
            }),
        );
        question.date_unit = unit;
        question
    }

    /// Integer answer matched against inclusive tier ranges.
    pub fn count(
        number: &str,
        question: &str,
        high: Option<RangeInclusive<i64>>,
        medium: Option<RangeInclusive<i64>>,
        low: Option<RangeInclusive<i64>>,
    ) -> Self {
        Self::new(
            number,
            question,
            &[],
            ResponseType::Number,
            InputType::Number,
            RiskRule::Range(TierRanges { high, medium, low }),
        )
    }

    /// Multi-select answer; any selection in a tier list sets that tier.
    pub fn multi(
        number: &str,
        question: &str,
        options: &[&str],
        high: &[&str],
        medium: &[&str],
        low: &[&str],
    ) -> Self {
        Self::new(
            number,
            question,
            options,
            ResponseType::Checkbox,
            InputType::Multi,
            RiskRule::AnyOf(TierSet {
                high: strings(high),
                medium: strings(medium),
                low: strings(low),
            }),
        )
    }

    /// Multi-select answer scored by option combinations. Each pair is a
    /// comma-separated list of options that must all be selected.
    pub fn paired(
        number: &str,
        question: &str,
        options: &[&str],
        tiers: [&[&str]; 3],
        pairs: &[&str],
    ) -> Self {
        let [high, medium, low] = tiers;
        Self::new(
            number,
            question,
            options,
            ResponseType::Checkbox,
            InputType::Multi,
            RiskRule::Paired {
                tiers: TierSet {
                    high: strings(high),
                    medium: strings(medium),
                    low: strings(low),
                },
                pairs: pairs
                    .iter()
                    .map(|pair| pair.split(',').map(|item| item.trim().to_string()).collect())
                    .collect(),
            },
        )
    }

    /// Stop scoring the rest of the group once this question lands on one of
    /// `tiers`.
    pub fn breaking_on(mut self, tiers: &[RiskLevel]) -> Self {
        self.can_break_execution = true;
        self.break_when_risk_is = tiers.to_vec();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn breaks_on(&self, tier: RiskLevel) -> bool {
        self.can_break_execution && self.break_when_risk_is.contains(&tier)
    }
}

#[derive(Debug, Clone)]
pub struct QuestionGroup {
    pub id: u32,
    pub category: String,
    pub active: bool,
    pub questions: Vec<SubQuestion>,
}

impl QuestionGroup {
    pub fn new(id: u32, category: &str, questions: Vec<SubQuestion>) -> Self {
        Self {
            id,
            category: category.to_string(),
            active: true,
            questions,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn question(&self, number: &str) -> Option<&SubQuestion> {
        self.questions
            .iter()
            .find(|q| q.number.eq_ignore_ascii_case(number.trim()))
    }
}

/// An immutable, versioned questionnaire for one platform.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    pub version: &'static str,
    pub platform: Platform,
    pub groups: Vec<QuestionGroup>,
}

impl QuestionCatalog {
    pub fn group(&self, id: u32) -> Option<&QuestionGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Client-facing view: active groups with their active sub-questions,
    /// without any scoring rules. Groups left empty are dropped.
    pub fn active_view(&self) -> Vec<GroupView> {
        self.groups
            .iter()
            .filter(|g| g.active)
            .filter_map(|g| {
                let questions: Vec<QuestionView> = g
                    .questions
                    .iter()
                    .filter(|q| q.active)
                    .map(|q| QuestionView {
                        number: q.number.clone(),
                        question: q.question.clone(),
                        options: q.options.clone(),
                        response_type: q.response_type,
                        input_type: q.input_type,
                    })
                    .collect();
                (!questions.is_empty()).then(|| GroupView {
                    id: g.id,
                    category: g.category.clone(),
                    questions,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionView {
    pub number: String,
    pub question: String,
    pub options: Vec<String>,
    pub response_type: ResponseType,
    pub input_type: InputType,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GroupView {
    pub id: u32,
    pub category: String,
    pub questions: Vec<QuestionView>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
