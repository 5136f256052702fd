//! Folding the tiers of one question group into a group risk value.

use ars_core::models::risk::{GroupBreakdown, QuestionBreakdown, RiskLevel};

use crate::classify::Classified;

/// Look up a comma-joined, order-preserving tier sequence in the
/// combination table. Returns `None` for sequences the table does not list.
pub fn combination(sequence: &str) -> Option<RiskLevel> {
    let combined = match sequence {
        "high" | "high,high" | "high,high,high" => RiskLevel::High,
        "medium"
        | "high,medium"
        | "medium,medium"
        | "high,high,medium"
        | "high,medium,high"
        | "high,medium,medium" => RiskLevel::Medium,
        "low" | "high,low" | "low,low" | "medium,low" | "high,high,low" => RiskLevel::Low,
        _ => return None,
    };
    Some(combined)
}

/// Combined tier for a sequence. Sequences missing from the table resolve
/// to low.
pub fn combined_tier(sequence: &str) -> RiskLevel {
    combination(sequence).unwrap_or_else(|| {
        tracing::debug!(sequence, "tier sequence not in combination table, using low");
        RiskLevel::Low
    })
}

/// Score one group from its classified answers, in the order they were asked.
pub fn aggregate_group(group_id: u32, results: &[Classified]) -> GroupBreakdown {
    let questions = results
        .iter()
        .map(|r| QuestionBreakdown {
            number: r.number.clone(),
            response: r.response.clone(),
            risk_value: r.tier.weight(),
        })
        .collect();

    let risk_value = match results {
        [] => 0,
        [single] => single.tier.weight(),
        many => {
            let mut sequence = String::new();
            let mut combined = RiskLevel::Low;
            for result in many {
                if !sequence.is_empty() {
                    sequence.push(',');
                }
                sequence.push_str(result.tier.as_str());
                combined = combined_tier(&sequence);
            }
            combined.weight()
        }
    };

    GroupBreakdown {
        id: group_id,
        risk_value,
        questions,
    }
}
