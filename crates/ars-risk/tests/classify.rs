use jiff::civil::date;

use ars_core::models::response::ResponseValue;
use ars_core::models::risk::{Platform, RiskLevel};
use ars_risk::catalog::{DateUnit, SubQuestion};
use ars_risk::classify::{classify, elapsed, TierFlags};
use ars_risk::error::RiskError;

fn list(items: &[&str]) -> ResponseValue {
    ResponseValue::List(items.iter().map(|s| s.to_string()).collect())
}

fn web_question(group_id: u32) -> &'static SubQuestion {
    ars_risk::catalog(Platform::Web)
        .group(group_id)
        .and_then(|g| g.question("a"))
        .unwrap()
}

fn tier_of(group_id: u32, response: ResponseValue) -> RiskLevel {
    classify(
        group_id,
        web_question(group_id),
        &response,
        date(2026, 1, 1),
    )
    .unwrap()
    .tier
}

#[test]
fn dates_become_calendar_years_or_months() {
    let today = date(2026, 1, 1);
    let years = SubQuestion::date("a", "Born?", DateUnit::Years, [2], [], []);
    let months = SubQuestion::date("b", "Last loss?", DateUnit::Months, [24], [], []);
    let raw = ResponseValue::from("2024-01-01");

    let by_years = classify(1, &years, &raw, today).unwrap();
    assert_eq!(by_years.response, ResponseValue::Number(2));
    assert_eq!(by_years.tier, RiskLevel::High);

    let by_months = classify(1, &months, &raw, today).unwrap();
    assert_eq!(by_months.response, ResponseValue::Number(24));
    assert_eq!(by_months.tier, RiskLevel::High);
}

#[test]
fn elapsed_ignores_day_of_month() {
    assert_eq!(
        elapsed(date(2025, 3, 31), date(2026, 3, 1), DateUnit::Months),
        12
    );
    assert_eq!(
        elapsed(date(2025, 12, 31), date(2026, 1, 1), DateUnit::Years),
        1
    );
}

#[test]
fn accepts_timestamps_and_bare_years() {
    let born = SubQuestion::date("a", "Born?", DateUnit::Years, [], [], 0..=100);
    let today = date(2026, 6, 1);

    let from_ts = classify(1, &born, &"1996-05-04T10:00:00Z".into(), today).unwrap();
    assert_eq!(from_ts.response, ResponseValue::Number(30));

    let from_year = classify(1, &born, &"1990".into(), today).unwrap();
    assert_eq!(from_year.response, ResponseValue::Number(36));

    let from_number = classify(1, &born, &ResponseValue::Number(2000), today).unwrap();
    assert_eq!(from_number.response, ResponseValue::Number(26));
}

#[test]
fn unparsable_date_is_a_validation_error() {
    let born = SubQuestion::date("a", "Born?", DateUnit::Years, [], [], []);
    let err = classify(1, &born, &"last spring".into(), date(2026, 1, 1)).unwrap_err();
    assert!(matches!(err, RiskError::InvalidResponse { group_id: 1, .. }));
    assert!(err.is_validation());
}

#[test]
fn numbers_use_leading_integer() {
    let births = SubQuestion::count("a", "Births?", Some(5..=20), None, Some(0..=4));
    let today = date(2026, 1, 1);

    let parsed = classify(2, &births, &"6 times".into(), today).unwrap();
    assert_eq!(parsed.response, ResponseValue::Number(6));
    assert_eq!(parsed.tier, RiskLevel::High);

    let low = classify(2, &births, &ResponseValue::Number(2), today).unwrap();
    assert_eq!(low.tier, RiskLevel::Low);

    let err = classify(2, &births, &"many".into(), today).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn out_of_range_number_matches_no_tier() {
    let births = SubQuestion::count("a", "Births?", Some(5..=20), None, Some(0..=4));
    let result = classify(2, &births, &ResponseValue::Number(40), date(2026, 1, 1)).unwrap();
    assert_eq!(result.tier, RiskLevel::Low);
}

#[test]
fn direct_choice() {
    assert_eq!(tier_of(9, "Yes".into()), RiskLevel::High);
    assert_eq!(tier_of(9, "No".into()), RiskLevel::Low);
    assert_eq!(tier_of(6, "Yes".into()), RiskLevel::Medium);
}

#[test]
fn multi_select_takes_highest_tier_present() {
    assert_eq!(
        tier_of(7, list(&["Diabetes", "Sickle cell disease"])),
        RiskLevel::High
    );
    assert_eq!(tier_of(7, list(&["Diabetes", "Twins"])), RiskLevel::Medium);
    assert_eq!(tier_of(7, list(&["Twins"])), RiskLevel::Low);
}

#[test]
fn multi_select_accepts_a_single_string() {
    assert_eq!(tier_of(7, "Hypertension".into()), RiskLevel::Medium);
}

#[test]
fn symptom_count_heuristic() {
    assert_eq!(tier_of(19, list(&["Fainting"])), RiskLevel::High);
    assert_eq!(
        tier_of(19, list(&["Dizziness", "Palpitations", "Breathlessness"])),
        RiskLevel::High
    );
    assert_eq!(tier_of(19, list(&["Dizziness", "Palpitations"])), RiskLevel::Medium);
    assert_eq!(tier_of(19, list(&["None of the above"])), RiskLevel::Low);
}

#[test]
fn paired_options_fire_only_when_complete() {
    assert_eq!(
        tier_of(17, list(&["Severe headache", "Leg swelling"])),
        RiskLevel::High
    );
    // Half a pair fires nothing.
    assert_eq!(tier_of(17, list(&["Severe headache"])), RiskLevel::Low);
    assert_eq!(tier_of(17, list(&["None of the above"])), RiskLevel::Low);
}

#[test]
fn paired_options_first_firing_pair_wins() {
    assert_eq!(tier_of(20, list(&["Fever", "Vomiting"])), RiskLevel::Medium);
    assert_eq!(
        tier_of(
            20,
            list(&["Vomiting", "Fever", "Severe body weakness", "Severe joint pain"])
        ),
        RiskLevel::High
    );
}

#[test]
fn pair_items_are_trimmed() {
    assert_eq!(
        tier_of(
            22,
            list(&[
                "Body swelling",
                "Restlessness",
                "Easily gets tired when doing small work",
                "Feeling your heart beat fast",
            ])
        ),
        RiskLevel::High
    );
}

#[test]
fn tie_break_prefers_high_then_medium() {
    let flags = |high, medium, low| TierFlags { high, medium, low };
    assert_eq!(flags(true, true, false).resolve(), RiskLevel::High);
    assert_eq!(flags(true, false, true).resolve(), RiskLevel::High);
    assert_eq!(flags(false, true, true).resolve(), RiskLevel::Medium);
    assert_eq!(flags(false, false, true).resolve(), RiskLevel::Low);
    assert_eq!(flags(false, false, false).resolve(), RiskLevel::Low);
}
