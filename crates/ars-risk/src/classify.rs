//! Per-answer normalization and tier classification.
//!
//! The strategy follows from the sub-question's [`RiskRule`]:
//!
//! - `Direct`: the normalized answer is a member of a tier's value list.
//! - `Range`: the numeric answer lies inside a tier's inclusive bounds.
//! - `AnyOf`: at least one selection appears in a tier's list.
//! - `Paired`: for [`SYMPTOM_COUNT_GROUP`], a count/severity heuristic;
//!   otherwise the configured option pairs are walked in order and the first
//!   pair whose options are all selected and which touches a tier list wins.
//!
//! Several tiers can be true at once; [`TierFlags::resolve`] breaks the tie.

use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::Timestamp;

use ars_core::models::response::{leading_integer, ResponseValue};
use ars_core::models::risk::RiskLevel;

use crate::catalog::{DateUnit, InputType, RiskRule, SubQuestion, TierRanges, TierSet};
use crate::error::RiskError;

/// Group whose paired-option question is scored by symptom count.
pub const SYMPTOM_COUNT_GROUP: u32 = 19;

/// Selecting this symptom alone makes the symptom-count question high risk.
pub const SEVERE_SYMPTOM: &str = "Fainting";

/// The explicit "no symptoms" option.
pub const NO_SYMPTOM: &str = "None of the above";

const SYMPTOM_COUNT_THRESHOLD: usize = 3;

/// One classified answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub number: String,
    pub response: ResponseValue,
    pub tier: RiskLevel,
}

/// Which tiers an answer matched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TierFlags {
    pub high: bool,
    pub medium: bool,
    pub low: bool,
}

impl TierFlags {
    fn only(tier: RiskLevel) -> Self {
        Self {
            high: tier == RiskLevel::High,
            medium: tier == RiskLevel::Medium,
            low: tier == RiskLevel::Low,
        }
    }

    /// High beats anything it co-occurs with; medium beats low; no match is low.
    pub fn resolve(self) -> RiskLevel {
        match (self.high, self.medium, self.low) {
            (true, _, _) => RiskLevel::High,
            (false, true, _) => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Normalize `raw` and classify it against the sub-question's rule.
///
/// `today` anchors date arithmetic so scoring is reproducible.
pub fn classify(
    group_id: u32,
    question: &SubQuestion,
    raw: &ResponseValue,
    today: Date,
) -> Result<Classified, RiskError> {
    let response = normalize(group_id, question, raw, today)?;

    let flags = match &question.rule {
        RiskRule::Direct(tiers) => direct(tiers, &response),
        RiskRule::Range(ranges) => range(ranges, &response),
        RiskRule::AnyOf(tiers) => any_of(tiers, &response),
        RiskRule::Paired { .. } if group_id == SYMPTOM_COUNT_GROUP => symptom_count(&response),
        RiskRule::Paired { tiers, pairs } => paired(tiers, pairs, &response),
    };

    Ok(Classified {
        number: question.number.clone(),
        response,
        tier: flags.resolve(),
    })
}

/// Convert a raw answer into the shape its rule compares against.
pub fn normalize(
    group_id: u32,
    question: &SubQuestion,
    raw: &ResponseValue,
    today: Date,
) -> Result<ResponseValue, RiskError> {
    let invalid = |reason: &str| RiskError::InvalidResponse {
        group_id,
        number: question.number.clone(),
        reason: reason.to_string(),
    };

    match question.input_type {
        InputType::Date => {
            let date = parse_date(raw).ok_or_else(|| invalid("expected a date"))?;
            Ok(ResponseValue::Number(elapsed(date, today, question.date_unit)))
        }
        InputType::Number => match raw {
            ResponseValue::Number(n) => Ok(ResponseValue::Number(*n)),
            ResponseValue::Text(text) => leading_integer(text)
                .map(ResponseValue::Number)
                .ok_or_else(|| invalid("expected a whole number")),
            ResponseValue::List(_) => Err(invalid("expected a whole number")),
        },
        InputType::Multi | InputType::Other => Ok(raw.clone()),
    }
}

/// Whole calendar years or months between `date` and `today`. Day of month
/// is ignored, matching how the questionnaire was designed.
pub fn elapsed(date: Date, today: Date, unit: DateUnit) -> i64 {
    let years = i64::from(today.year()) - i64::from(date.year());
    match unit {
        DateUnit::Years => years,
        DateUnit::Months => years * 12 + (i64::from(today.month()) - i64::from(date.month())),
    }
}

fn parse_date(raw: &ResponseValue) -> Option<Date> {
    match raw {
        ResponseValue::Text(text) => {
            let text = text.trim();
            if let Ok(date) = text.parse::<Date>() {
                return Some(date);
            }
            if let Ok(ts) = text.parse::<Timestamp>() {
                return Some(ts.to_zoned(TimeZone::UTC).date());
            }
            if let Ok(dt) = text.parse::<DateTime>() {
                return Some(dt.date());
            }
            if text.len() == 4 {
                return text.parse::<i16>().ok().and_then(year_start);
            }
            None
        }
        ResponseValue::Number(n) => i16::try_from(*n).ok().and_then(year_start),
        ResponseValue::List(_) => None,
    }
}

fn year_start(year: i16) -> Option<Date> {
    if !(1000..=9999).contains(&year) {
        return None;
    }
    Date::new(year, 1, 1).ok()
}

fn direct(tiers: &TierSet<ResponseValue>, response: &ResponseValue) -> TierFlags {
    TierFlags {
        high: tiers.high.contains(response),
        medium: tiers.medium.contains(response),
        low: tiers.low.contains(response),
    }
}

fn range(ranges: &TierRanges, response: &ResponseValue) -> TierFlags {
    let ResponseValue::Number(value) = response else {
        return TierFlags::default();
    };
    let within = |bounds: &Option<std::ops::RangeInclusive<i64>>| {
        bounds.as_ref().is_some_and(|r| r.contains(value))
    };
    TierFlags {
        high: within(&ranges.high),
        medium: within(&ranges.medium),
        low: within(&ranges.low),
    }
}

fn any_of(tiers: &TierSet<String>, response: &ResponseValue) -> TierFlags {
    let selected = response.selections();
    let intersects = |list: &[String]| selected.iter().any(|s| list.iter().any(|v| v == s));
    TierFlags {
        high: intersects(&tiers.high),
        medium: intersects(&tiers.medium),
        low: intersects(&tiers.low),
    }
}

fn symptom_count(response: &ResponseValue) -> TierFlags {
    let selected = response.selections();
    if selected.contains(&SEVERE_SYMPTOM) || selected.len() >= SYMPTOM_COUNT_THRESHOLD {
        TierFlags::only(RiskLevel::High)
    } else if !selected.contains(&NO_SYMPTOM) {
        TierFlags::only(RiskLevel::Medium)
    } else {
        TierFlags::only(RiskLevel::Low)
    }
}

fn paired(tiers: &TierSet<String>, pairs: &[Vec<String>], response: &ResponseValue) -> TierFlags {
    let selected = response.selections();
    for pair in pairs {
        if !pair.iter().all(|item| selected.contains(&item.as_str())) {
            continue;
        }
        let touches = |list: &[String]| pair.iter().any(|item| list.contains(item));
        if touches(&tiers.high) {
            return TierFlags::only(RiskLevel::High);
        } else if touches(&tiers.medium) {
            return TierFlags::only(RiskLevel::Medium);
        } else if touches(&tiers.low) {
            return TierFlags::only(RiskLevel::Low);
        }
    }
    // No firing pair sets no tier, which resolves to low.
    TierFlags::default()
}
