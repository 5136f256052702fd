use ars_core::models::response::ResponseValue;
use ars_core::models::risk::RiskLevel;
use ars_risk::aggregate::{aggregate_group, combination, combined_tier};
use ars_risk::classify::Classified;

use RiskLevel::{High, Low, Medium};

fn results(tiers: &[RiskLevel]) -> Vec<Classified> {
    tiers
        .iter()
        .zip(["a", "b", "c"])
        .map(|(tier, number)| Classified {
            number: number.to_string(),
            response: ResponseValue::from("Yes"),
            tier: *tier,
        })
        .collect()
}

#[test]
fn single_question_group_uses_weight() {
    for tier in [High, Medium, Low] {
        assert_eq!(aggregate_group(4, &results(&[tier])).risk_value, tier.weight());
    }
}

#[test]
fn folds_through_combination_table() {
    assert_eq!(aggregate_group(8, &results(&[High, Medium])).risk_value, 1);
    assert_eq!(aggregate_group(8, &results(&[High, High])).risk_value, 7);
    assert_eq!(aggregate_group(8, &results(&[High, High, Medium])).risk_value, 1);
    assert_eq!(aggregate_group(8, &results(&[Medium, Low])).risk_value, 0);
}

#[test]
fn unlisted_sequences_default_to_low() {
    assert_eq!(combination("medium,medium,high"), None);
    assert_eq!(combined_tier("medium,medium,high"), Low);
    assert_eq!(combined_tier("low,high"), Low);
    assert_eq!(
        aggregate_group(2, &results(&[Medium, Medium, High])).risk_value,
        0
    );
}

#[test]
fn breakdown_keeps_per_question_weights() {
    let group = aggregate_group(8, &results(&[High, Medium]));
    assert_eq!(group.id, 8);
    let weights: Vec<u32> = group.questions.iter().map(|q| q.risk_value).collect();
    assert_eq!(weights, vec![7, 1]);
    assert_eq!(group.questions[1].number, "b");
}

#[test]
fn empty_group_scores_zero() {
    let group = aggregate_group(1, &[]);
    assert_eq!(group.risk_value, 0);
    assert!(group.questions.is_empty());
}
