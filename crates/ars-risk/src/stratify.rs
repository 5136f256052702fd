use jiff::civil::Date;
use uuid::Uuid;

use ars_core::models::risk::{GroupBreakdown, Platform, RiskLevel, RiskRecord};
use ars_core::models::submission::GroupResponse;

use crate::aggregate::aggregate_group;
use crate::catalog::QuestionCatalog;
use crate::classify::classify;
use crate::error::RiskError;
use crate::recommendation;

/// The scored body of a risk record, before it is given an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stratification {
    pub risk_level: RiskLevel,
    pub risk_value: u32,
    pub patient_response: Vec<GroupBreakdown>,
    pub recommendation: String,
}

impl Stratification {
    pub fn into_record(self, patient_id: Uuid, platform: Platform) -> RiskRecord {
        RiskRecord {
            id: Uuid::new_v4(),
            patient_id,
            risk_level: self.risk_level,
            risk_value: self.risk_value,
            platform,
            patient_response: self.patient_response,
            recommendation: self.recommendation,
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// Reject submissions that cannot be scored at all.
pub fn validate(groups: &[GroupResponse]) -> Result<(), RiskError> {
    if groups.is_empty() {
        return Err(RiskError::EmptySubmission);
    }
    for group in groups {
        if group.questions.is_empty() {
            return Err(RiskError::EmptyGroup { group_id: group.id });
        }
        if let Some(answer) = group.questions.iter().find(|a| a.number.trim().is_empty()) {
            return Err(RiskError::InvalidResponse {
                group_id: group.id,
                number: answer.number.clone(),
                reason: "missing sub-question number".to_string(),
            });
        }
    }
    Ok(())
}

/// Score a full submission against `catalog`.
///
/// Groups and their answers are processed in submission order. Every group
/// and sub-question must exist in the catalog; a missing reference aborts the
/// whole submission.
pub fn stratify(
    catalog: &QuestionCatalog,
    groups: &[GroupResponse],
    today: Date,
) -> Result<Stratification, RiskError> {
    validate(groups)?;

    let mut total = 0;
    let mut patient_response = Vec::with_capacity(groups.len());

    for group in groups {
        let template = catalog.group(group.id).ok_or(RiskError::UnknownGroup {
            group_id: group.id,
            catalog: catalog.platform.as_str(),
        })?;

        let mut results = Vec::with_capacity(group.questions.len());
        for answer in &group.questions {
            let question =
                template
                    .question(&answer.number)
                    .ok_or_else(|| RiskError::UnknownQuestion {
                        group_id: group.id,
                        number: answer.number.clone(),
                    })?;

            let classified = classify(group.id, question, &answer.response, today)?;
            let stop = question.breaks_on(classified.tier);
            results.push(classified);
            if stop {
                break;
            }
        }

        let scored = aggregate_group(group.id, &results);
        total += scored.risk_value;
        patient_response.push(scored);
    }

    let risk_level = RiskLevel::band_for(total);
    tracing::debug!(
        catalog = catalog.version,
        risk_value = total,
        risk_level = %risk_level,
        "submission stratified"
    );

    Ok(Stratification {
        risk_level,
        risk_value: total,
        patient_response,
        recommendation: recommendation::for_band(risk_level).required_action.to_string(),
    })
}
